//! Helper macro for port error enums.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! fields accept anything convertible into the field type.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
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
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum LedgerStoreError {
            Offline => "ledger store offline",
            Query { message: String } => "ledger query failed: {message}",
            Stale { expected: u64, actual: u64 } => "stale ledger: expected {expected}, found {actual}",
        }
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(LedgerStoreError::offline(), LedgerStoreError::Offline);
        assert_eq!(LedgerStoreError::offline().to_string(), "ledger store offline");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = LedgerStoreError::query("timeout");
        assert_eq!(err.to_string(), "ledger query failed: timeout");
    }

    #[test]
    fn numeric_fields_keep_their_types() {
        let err = LedgerStoreError::stale(2_u64, 4_u64);
        assert_eq!(
            err,
            LedgerStoreError::Stale {
                expected: 2,
                actual: 4
            }
        );
        assert_eq!(err.to_string(), "stale ledger: expected 2, found 4");
    }
}
