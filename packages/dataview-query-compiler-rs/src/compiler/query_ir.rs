impl QueryIr {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            ..Self::default()
        }
    }

    /// Renders the DQL query. Clause order is fixed:
    /// `LIST`, `FROM`, `FLATTEN`*, `WHERE`, `SORT`, `GROUP BY`, `LIMIT`.
    pub fn to_query_string(&self) -> String {
        let mut clauses = Vec::new();

        clauses.push(match &self.select {
            Some(select) => format!("LIST {select}"),
            None => "LIST".to_string(),
        });
        if !self.from.is_empty() {
            clauses.push(format!("FROM {}", self.from));
        }
        for flatten in &self.flattens {
            clauses.push(format!("FLATTEN {flatten}"));
        }
        if !self.wheres.is_empty() {
            clauses.push(format!("WHERE {}", self.wheres.join(" AND ")));
        }
        if !self.sorts.is_empty() {
            let sorts = self
                .sorts
                .iter()
                .map(|sort| format!("{} {}", sort.field, sort.direction.as_str()))
                .collect::<Vec<_>>();
            clauses.push(format!("SORT {}", sorts.join(", ")));
        }
        if !self.groups.is_empty() {
            clauses.push(format!("GROUP BY {}", self.groups.join(", ")));
        }
        if let Some(limit) = self.limit {
            clauses.push(format!("LIMIT {limit}"));
        }

        clauses.join(" ")
    }
}
