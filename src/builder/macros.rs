//! Macros for ergonomic state definitions.

/// Declare an enum usable as a graph state.
///
/// Derives everything a [`State`](crate::core::State) needs plus serde
/// support for persisting providers, and adds a `name()` accessor and a
/// `Display` impl rendering the variant name.
///
/// # Example
///
/// ```
/// use stateflow::state_enum;
///
/// state_enum! {
///     pub enum IssueState {
///         Open,
///         Fixed,
///         Closed,
///     }
/// }
///
/// assert_eq!(IssueState::Fixed.name(), "Fixed");
/// assert_eq!(IssueState::Closed.to_string(), "Closed");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Variant name of the state.
            #[allow(dead_code)]
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}
