//! Macro generating port error enums together with their domain mapping.
//!
//! ```text
//! define_port_error! {
//!     pub enum VoteRepositoryError {
//!         Connection { message: String } =>
//!             "connection failed: {message}" as ServiceUnavailable,
//!         IdentityMissing { identity_id: IdentityId } =>
//!             "identity {identity_id} missing" as NotFound,
//!     }
//! }
//! ```
//!
//! Each variant becomes a `thiserror` variant with a snake_case constructor
//! taking `impl Into<T>` per field, and maps to [`Error`](crate::domain::Error)
//! with the named [`ErrorCode`](crate::domain::ErrorCode) and the rendered
//! message. Services can therefore propagate port failures with `?`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (@pattern $variant:ident) => { Self::$variant };
    (@pattern $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => { Self::$variant { .. } };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )?
                    => $message:literal as $code:ident
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*

            /// Domain error code this failure surfaces as.
            #[must_use]
            pub fn error_code(&self) -> $crate::domain::ErrorCode {
                match self {
                    $(
                        define_port_error!(@pattern $variant $( { $($field : $ty),* } )?)
                            => $crate::domain::ErrorCode::$code,
                    )*
                }
            }
        }

        impl From<$name> for $crate::domain::Error {
            fn from(error: $name) -> Self {
                Self::new(error.error_code(), error.to_string())
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use crate::domain::{Error, ErrorCode};
    use rstest::rstest;

    define_port_error! {
        pub enum SamplePortError {
            Offline => "store offline" as ServiceUnavailable,
            Query { message: String } => "query failed: {message}" as InternalError,
            Missing { kind: String, count: u64 } => "{count} {kind} missing" as NotFound,
        }
    }

    #[rstest]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(SamplePortError::offline(), SamplePortError::Offline);
        assert_eq!(SamplePortError::offline().to_string(), "store offline");
    }

    #[rstest]
    fn string_fields_accept_borrowed_text() {
        let err = SamplePortError::query("syntax error");
        assert_eq!(err.to_string(), "query failed: syntax error");
    }

    #[rstest]
    fn mixed_fields_keep_their_types() {
        let err = SamplePortError::missing("votes", 3_u64);
        assert_eq!(err.to_string(), "3 votes missing");
    }

    #[rstest]
    #[case(SamplePortError::offline(), ErrorCode::ServiceUnavailable)]
    #[case(SamplePortError::query("bad sql"), ErrorCode::InternalError)]
    #[case(SamplePortError::missing("votes", 1_u64), ErrorCode::NotFound)]
    fn variants_map_to_their_declared_code(
        #[case] err: SamplePortError,
        #[case] code: ErrorCode,
    ) {
        let message = err.to_string();

        let mapped = Error::from(err);

        assert_eq!(mapped.code(), code);
        assert_eq!(mapped.message(), message);
    }
}
