/// Literal payloads carried by `Constant` nodes
///
/// Integers that do not fit an `i64` keep their digits as text; there is no
/// big-integer type in this crate.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    None,
    Bool(bool),
    Int(i64),
    /// Integer literal too large for `i64`, as decimal digits
    BigInt(String),
    Float(f64),
    /// Imaginary literal rendered the way Python prints it, e.g. `2j`
    Complex(String),
    Str(String),
    Bytes(Vec<u8>),
    Ellipsis,
}
