//! Typed coercion of atoms.
//!
//! Each function returns `None` when the atom does not hold a value of the
//! requested type; [`Fields`](super::Fields) turns that into an E3xx
//! diagnostic.

use crate::tree::Atom;

/// A finite decimal number.
///
/// Quoted numbers are accepted; some older files quote every value.
pub fn number(atom: &Atom) -> Option<f64> {
    atom.text()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// A whole number.
pub fn integer(atom: &Atom) -> Option<i64> {
    atom.text().parse().ok()
}

/// `yes` or `no`.
pub fn boolean(atom: &Atom) -> Option<bool> {
    match atom.text() {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number() {
        assert_eq!(number(&Atom::symbol("1.27")), Some(1.27));
        assert_eq!(number(&Atom::symbol("-0.5")), Some(-0.5));
        assert_eq!(number(&Atom::symbol("1e3")), Some(1000.0));
        assert_eq!(number(&Atom::string("2")), Some(2.0));
        assert_eq!(number(&Atom::symbol("abc")), None);
        assert_eq!(number(&Atom::symbol("inf")), None);
        assert_eq!(number(&Atom::symbol("NaN")), None);
    }

    #[test]
    fn test_integer() {
        assert_eq!(integer(&Atom::symbol("20211014")), Some(20211014));
        assert_eq!(integer(&Atom::symbol("-3")), Some(-3));
        assert_eq!(integer(&Atom::symbol("1.5")), None);
    }

    #[test]
    fn test_boolean() {
        assert_eq!(boolean(&Atom::symbol("yes")), Some(true));
        assert_eq!(boolean(&Atom::symbol("no")), Some(false));
        assert_eq!(boolean(&Atom::symbol("true")), None);
    }
}
