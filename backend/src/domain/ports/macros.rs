//! `define_port_error!` declares a port error enum with `thiserror` messages
//! and one snake_case constructor per variant.
//!
//! Constructor parameters are `impl Into<T>`, so `String` fields accept `&str`.

macro_rules! define_port_error {
    (
        $(#[$enum_meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field: $ty),* } )?,
            )*
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = concat!("Build [`", stringify!($name), "::", stringify!($variant), "`].")]
                    #[must_use]
                    pub fn [<$variant:snake>]($( $($field: impl Into<$ty>),* )?) -> Self {
                        Self::$variant $( { $($field: $field.into()),* } )?
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum StoreError {
            Offline => "store offline",
            Rejected { reason: String } => "rejected: {reason}",
            Throttled { attempts: u32, reason: String } => "throttled after {attempts}: {reason}",
        }
    }

    #[rstest]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(StoreError::offline(), StoreError::Offline);
        assert_eq!(StoreError::offline().to_string(), "store offline");
    }

    #[rstest]
    fn string_fields_accept_str() {
        let err = StoreError::rejected("quota");
        assert_eq!(
            err,
            StoreError::Rejected {
                reason: "quota".to_owned()
            }
        );
        assert_eq!(err.to_string(), "rejected: quota");
    }

    #[rstest]
    fn mixed_fields_keep_declaration_order() {
        let err = StoreError::throttled(3_u32, "busy");
        assert_eq!(err.to_string(), "throttled after 3: busy");
    }
}
