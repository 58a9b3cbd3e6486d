//! `define_port_error!`: one declaration per port error enum.
//!
//! The macro derives `thiserror::Error` from the per-variant message and adds
//! a snake_case constructor per variant. Constructor parameters take
//! `impl Into<T>`, so adapters write `SupplyRepositoryError::query(err.to_string())`
//! or `TokenError::expired()`.

macro_rules! define_port_error {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
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
                    pub fn [<$variant:snake>]($($($field: impl Into<$ty>),*)?) -> Self {
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
    //! Regression coverage for this module.
    define_port_error! {
        pub enum SamplePortError {
            Connection { message: String } => "store unreachable: {message}",
            Duplicate { email: String } => "duplicate key: {email}",
            Expired => "token expired",
            Retry { message: String, attempts: u32 } => "{message} after {attempts} attempts",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = SamplePortError::connection("timeout");
        assert_eq!(err.to_string(), "store unreachable: timeout");
        assert_eq!(
            SamplePortError::duplicate("ada@example.org").to_string(),
            "duplicate key: ada@example.org"
        );
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(SamplePortError::expired(), SamplePortError::Expired);
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = SamplePortError::retry("gave up", 3_u32);
        assert_eq!(err.to_string(), "gave up after 3 attempts");
    }
}
