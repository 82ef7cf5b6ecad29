macro_rules! runtime_type_impls {
    (
        simple_types: {
            $( $variant:ident => $name:literal, value_type: $is_value:literal, default: $default:expr ),* $(,)?
        },
        complex_types: {
            $( $complex_variant:ident ( $($tuple_arg:ty),* ) ),* $(,)?
        },
        get_name: {
            $( $name_pat:pat => $name_expr:expr ),* $(,)?
        },
        is_value_type: {
            $( $vt_pat:pat => $vt_expr:expr ),* $(,)?
        },
        default_value: {
            $( $def_pat:pat => $def_expr:expr ),* $(,)?
        }
    ) => {
        #[derive(Clone, PartialEq, Eq, Hash)]
        pub enum RuntimeType {
            $( $variant, )*
            $( $complex_variant( $($tuple_arg),* ), )*
        }

        impl RuntimeType {
            /// Looks up a primitive type by its short (`Int32`) or
            /// namespace-qualified (`System.Int32`) name.
            pub fn primitive(name: &str) -> Option<Self> {
                let short = name.strip_prefix("System.").unwrap_or(name);
                match short {
                    $( $name => Some(RuntimeType::$variant), )*
                    _ => None,
                }
            }

            pub fn get_name(&self) -> String {
                match self {
                    $( RuntimeType::$variant => $name.to_string(), )*
                    $( $name_pat => $name_expr, )*
                }
            }

            pub fn is_value_type(&self) -> bool {
                match self {
                    $( RuntimeType::$variant => $is_value, )*
                    $( $vt_pat => $vt_expr, )*
                }
            }

            /// The value a field of this type holds before any constructor runs.
            pub fn default_value(&self) -> Value {
                match self {
                    $( RuntimeType::$variant => $default, )*
                    $( $def_pat => $def_expr, )*
                }
            }
        }
    };
}
