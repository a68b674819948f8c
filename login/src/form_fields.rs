/// Create an enum of the inputs in a form that can be cycled with
/// tab/shift-tab. Each variant must share its name with a
/// `login_core::Field` so errors can be looked up for whichever input has
/// focus.
#[macro_export]
macro_rules! form_fields {
    ($name:ident, $($variant:ident),+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every input, in tab order
            pub const FIELDS: &'static [$name] = &[
                $($name::$variant),+
            ];

            /// Position in tab order
            fn index(self) -> usize {
                self as usize
            }

            /// Rotate through the options (e.g. with tab)
            pub fn next(self) -> Self {
                Self::FIELDS[(self.index() + 1) % Self::FIELDS.len()]
            }

            /// Rotate through the options in reverse (e.g. with shift-tab)
            pub fn prev(self) -> Self {
                Self::FIELDS[(self.index() + Self::FIELDS.len() - 1) % Self::FIELDS.len()]
            }
        }

        impl From<$name> for login_core::Field {
            fn from(focus: $name) -> Self {
                match focus {
                    $($name::$variant => login_core::Field::$variant),+
                }
            }
        }
    };
}
