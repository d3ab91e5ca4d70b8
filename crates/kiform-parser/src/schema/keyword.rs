//! Closed sets of bare keywords.

/// A closed set of bare keywords.
///
/// Implemented with the [`keywords!`](crate::keywords) macro.
pub trait Keyword: Sized + Copy + 'static {
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    /// The keyword as written in a document.
    fn as_str(&self) -> &'static str;

    /// Look up a keyword by its text.
    fn from_keyword(text: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|keyword| keyword.as_str() == text)
    }

    /// All keywords joined for an error message, e.g. "`smd`, `connect`".
    fn expected() -> String {
        Self::ALL
            .iter()
            .map(|keyword| format!("`{}`", keyword.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Define an enum whose variants map one-to-one onto bare keywords.
///
/// The enum gets the usual derives, a [`Keyword`] impl, `Display`, and a
/// [`FieldValue`](crate::schema::FieldValue) impl that writes it as a bare
/// atom.
///
/// ```
/// use kiform_parser::{keywords, schema::Keyword};
///
/// keywords! {
///     /// Fill mode of a closed shape.
///     pub enum Fill {
///         Solid => "solid",
///         None => "none",
///     }
/// }
///
/// assert_eq!(Fill::from_keyword("solid"), Some(Fill::Solid));
/// assert_eq!(Fill::None.to_string(), "none");
/// ```
#[macro_export]
macro_rules! keywords {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $text:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        impl $crate::schema::Keyword for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::schema::Keyword::as_str(self))
            }
        }

        impl $crate::schema::FieldValue for $name {
            fn write(&self, node: &mut $crate::Node) {
                node.push($crate::Atom::symbol($crate::schema::Keyword::as_str(self)));
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::keywords! {
        enum Shape {
            Circle => "circle",
            Rect => "rect",
            RoundRect => "roundrect",
        }
    }

    #[test]
    fn test_from_keyword() {
        assert_eq!(Shape::from_keyword("rect"), Some(Shape::Rect));
        assert_eq!(Shape::from_keyword("roundrect"), Some(Shape::RoundRect));
        assert_eq!(Shape::from_keyword("Rect"), None);
    }

    #[test]
    fn test_expected_lists_every_keyword() {
        assert_eq!(Shape::expected(), "`circle`, `rect`, `roundrect`");
    }

    #[test]
    fn test_declaration_order() {
        assert!(Shape::Circle < Shape::RoundRect);
        assert_eq!(Shape::ALL.len(), 3);
    }
}
