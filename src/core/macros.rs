//! Macros for declaring symbol enums.

/// Generate a fieldless enum implementing [`Symbol`](crate::core::Symbol).
///
/// The enum derives everything the compiler needs (`Clone`, `Copy`, `Eq`,
/// `Hash`, `Debug`, serde) and names each variant after itself.
///
/// # Example
///
/// ```
/// use composite_state::symbol_enum;
/// use composite_state::core::Symbol;
///
/// symbol_enum! {
///     pub enum Light {
///         Red,
///         Amber,
///         Green,
///     }
/// }
///
/// assert_eq!(Light::Amber.name(), "Amber");
/// ```
#[macro_export]
macro_rules! symbol_enum {
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
            serde::Deserialize
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Symbol for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::Symbol;

    crate::symbol_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    #[test]
    fn symbol_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Processing.name(), "Processing");
        assert_eq!(TestState::Complete.name(), "Complete");
    }

    #[test]
    fn symbol_enum_supports_visibility() {
        crate::symbol_enum! {
            pub enum PublicInput {
                Go,
                Stop,
            }
        }

        assert_ne!(PublicInput::Go, PublicInput::Stop);
    }
}
