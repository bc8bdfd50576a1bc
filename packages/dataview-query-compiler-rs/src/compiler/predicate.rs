/// A where-condition in DQL terms, rendered once the whole lambda body has
/// been recognized.
#[derive(Debug, Clone, PartialEq)]
enum Predicate {
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
    Compare {
        left: Operand,
        op: &'static str,
        right: Operand,
    },
    Contains {
        haystack: Operand,
        needle: Operand,
    },
    Truthy(Operand),
}

#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Field(String),
    /// Literal already in DQL syntax.
    Literal(String),
}

impl Operand {
    fn render(&self) -> &str {
        match self {
            Operand::Field(field) => field,
            Operand::Literal(literal) => literal,
        }
    }
}

impl Predicate {
    fn all(terms: Vec<Predicate>) -> Predicate {
        let mut flat = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                Predicate::And(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Predicate::And(flat)
    }

    fn any(terms: Vec<Predicate>) -> Predicate {
        let mut flat = Vec::with_capacity(terms.len());
        for term in terms {
            match term {
                Predicate::Or(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Predicate::Or(flat)
    }

    /// Where-clause fragment. A top-level `OR` is parenthesized so the
    /// fragment can be joined to its siblings with `AND`.
    fn to_fragment(&self) -> String {
        match self {
            Predicate::Or(_) => format!("({})", self.render()),
            _ => self.render(),
        }
    }

    /// DQL gives `AND` and `OR` the same precedence, so a nested group of
    /// the other connective is always parenthesized.
    fn render(&self) -> String {
        match self {
            Predicate::And(terms) => terms
                .iter()
                .map(|term| match term {
                    Predicate::Or(_) => format!("({})", term.render()),
                    _ => term.render(),
                })
                .collect::<Vec<_>>()
                .join(" AND "),
            Predicate::Or(terms) => terms
                .iter()
                .map(|term| match term {
                    Predicate::And(_) => format!("({})", term.render()),
                    _ => term.render(),
                })
                .collect::<Vec<_>>()
                .join(" OR "),
            Predicate::Not(inner) => match inner.as_ref() {
                Predicate::Contains { .. } | Predicate::Truthy(_) => format!("!{}", inner.render()),
                _ => format!("!({})", inner.render()),
            },
            Predicate::Compare { left, op, right } => {
                format!("{} {op} {}", left.render(), right.render())
            }
            Predicate::Contains { haystack, needle } => {
                format!("contains({}, {})", haystack.render(), needle.render())
            }
            Predicate::Truthy(operand) => operand.render().to_string(),
        }
    }
}

/// DQL string literal.
fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}

fn contains_tag(tag: &str) -> String {
    Predicate::Contains {
        haystack: Operand::Field("file.tags".to_string()),
        needle: Operand::Literal(quote_string(tag)),
    }
    .to_fragment()
}
