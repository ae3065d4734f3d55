//! Macro utilitaria para declarar el enum de variantes de un wizard.
//!
//! ```ignore
//! step_types! {
//!     pub enum CheckoutStep {
//!         Cart => "cart",
//!         Address => "address",
//!         Done => "done",
//!     }
//! }
//! ```

/// Declara un enum de variantes con `StepType` y `Display` implementados.
#[macro_export]
macro_rules! step_types {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident => $tag:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name { $($variant),+ }

        impl $crate::step::StepType for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];
            fn as_str(&self) -> &'static str {
                match self { $($name::$variant => $tag),+ }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::step::StepType::as_str(self))
            }
        }
    };
}
