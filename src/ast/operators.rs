//! Leaf node families: expression contexts and operators
//!
//! These carry no fields of their own. Each family knows its Python tag and,
//! where it has a token, how to recognise it from source text.

/// Load/store/delete marker attached to names, attributes and containers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprContext {
    Load,
    Store,
    Del,
}

impl ExprContext {
    pub fn tag(&self) -> &'static str {
        match self {
            ExprContext::Load => "Load",
            ExprContext::Store => "Store",
            ExprContext::Del => "Del",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOperator {
    And,
    Or,
}

impl BoolOperator {
    pub fn tag(&self) -> &'static str {
        match self {
            BoolOperator::And => "And",
            BoolOperator::Or => "Or",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "and" => Some(BoolOperator::And),
            "or" => Some(BoolOperator::Or),
            _ => None,
        }
    }
}

/// Binary arithmetic and bitwise operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mult,
    MatMult,
    Div,
    Mod,
    Pow,
    LShift,
    RShift,
    BitOr,
    BitXor,
    BitAnd,
    FloorDiv,
}

impl Operator {
    pub fn tag(&self) -> &'static str {
        match self {
            Operator::Add => "Add",
            Operator::Sub => "Sub",
            Operator::Mult => "Mult",
            Operator::MatMult => "MatMult",
            Operator::Div => "Div",
            Operator::Mod => "Mod",
            Operator::Pow => "Pow",
            Operator::LShift => "LShift",
            Operator::RShift => "RShift",
            Operator::BitOr => "BitOr",
            Operator::BitXor => "BitXor",
            Operator::BitAnd => "BitAnd",
            Operator::FloorDiv => "FloorDiv",
        }
    }

    /// Recognise a binary operator token; augmented forms (`+=`) are accepted too
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.strip_suffix('=').unwrap_or(token);
        match token {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mult),
            "@" => Some(Operator::MatMult),
            "/" => Some(Operator::Div),
            "%" => Some(Operator::Mod),
            "**" => Some(Operator::Pow),
            "<<" => Some(Operator::LShift),
            ">>" => Some(Operator::RShift),
            "|" => Some(Operator::BitOr),
            "^" => Some(Operator::BitXor),
            "&" => Some(Operator::BitAnd),
            "//" => Some(Operator::FloorDiv),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Invert,
    Not,
    UAdd,
    USub,
}

impl UnaryOperator {
    pub fn tag(&self) -> &'static str {
        match self {
            UnaryOperator::Invert => "Invert",
            UnaryOperator::Not => "Not",
            UnaryOperator::UAdd => "UAdd",
            UnaryOperator::USub => "USub",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "~" => Some(UnaryOperator::Invert),
            "not" => Some(UnaryOperator::Not),
            "+" => Some(UnaryOperator::UAdd),
            "-" => Some(UnaryOperator::USub),
            _ => None,
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOperator {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

impl CmpOperator {
    pub fn tag(&self) -> &'static str {
        match self {
            CmpOperator::Eq => "Eq",
            CmpOperator::NotEq => "NotEq",
            CmpOperator::Lt => "Lt",
            CmpOperator::LtE => "LtE",
            CmpOperator::Gt => "Gt",
            CmpOperator::GtE => "GtE",
            CmpOperator::Is => "Is",
            CmpOperator::IsNot => "IsNot",
            CmpOperator::In => "In",
            CmpOperator::NotIn => "NotIn",
        }
    }

    /// Recognise a comparison token; `is not` and `not in` may span whitespace
    pub fn from_token(token: &str) -> Option<Self> {
        let words: Vec<&str> = token.split_whitespace().collect();
        match words.as_slice() {
            ["=="] => Some(CmpOperator::Eq),
            ["!="] | ["<>"] => Some(CmpOperator::NotEq),
            ["<"] => Some(CmpOperator::Lt),
            ["<="] => Some(CmpOperator::LtE),
            [">"] => Some(CmpOperator::Gt),
            [">="] => Some(CmpOperator::GtE),
            ["is"] => Some(CmpOperator::Is),
            ["is", "not"] => Some(CmpOperator::IsNot),
            ["in"] => Some(CmpOperator::In),
            ["not", "in"] => Some(CmpOperator::NotIn),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_tokens() {
        assert_eq!(Operator::from_token("|"), Some(Operator::BitOr));
        assert_eq!(Operator::from_token("//="), Some(Operator::FloorDiv));
        assert_eq!(Operator::from_token("**"), Some(Operator::Pow));
        assert_eq!(Operator::from_token("=="), None);
    }

    #[test]
    fn test_comparison_tokens_span_whitespace() {
        assert_eq!(CmpOperator::from_token("is  not"), Some(CmpOperator::IsNot));
        assert_eq!(CmpOperator::from_token("not\tin"), Some(CmpOperator::NotIn));
        assert_eq!(CmpOperator::from_token("<>"), Some(CmpOperator::NotEq));
        assert_eq!(CmpOperator::from_token("not"), None);
    }
}
