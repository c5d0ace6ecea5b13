//! Macros for declaring state identifiers.

/// Declare a fieldless enum usable as a state identifier.
///
/// The enum derives everything [`StateId`](crate::core::StateId) needs plus
/// serde support, so transition history over it can be serialized. An
/// associated `ALL` constant lists the variants in declaration order, which
/// is handy with `plain_states`.
///
/// # Example
///
/// ```
/// use tickfsm::state_ids;
/// use tickfsm::core::StateId;
///
/// state_ids! {
///     pub enum Light {
///         Red,
///         Green,
///         Yellow,
///     }
/// }
///
/// assert_eq!(Light::ALL, &[Light::Red, Light::Green, Light::Yellow]);
/// assert_eq!(Light::Yellow.name(), "Yellow");
/// assert_eq!(Light::Green.to_string(), "Green");
/// ```
#[macro_export]
macro_rules! state_ids {
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
            Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [$name] = &[$(Self::$variant),*];
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str(stringify!($variant))),*
                }
            }
        }
    };
}
