/// Declares a fieldless enum that the api transmits as an integer.
///
/// Values this crate doesn't know about yet deserialize to `Unknown` instead of failing the
/// whole payload, since the api adds new variants without bumping its version.
macro_rules! enum_number {
    ($name:ident : $repr:ty { $($variant:ident = $value:literal,)* }) => {
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
        pub enum $name {
            $($variant,)*
            Unknown($repr),
        }

        impl From<$repr> for $name {
            fn from(value: $repr) -> Self {
                match value {
                    $( $value => $name::$variant, )*
                    other => $name::Unknown(other),
                }
            }
        }

        impl From<$name> for $repr {
            fn from(value: $name) -> Self {
                match value {
                    $( $name::$variant => $value, )*
                    $name::Unknown(other) => other,
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                ::serde::Serialize::serialize(&<$repr>::from(*self), serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                <$repr as ::serde::Deserialize>::deserialize(deserializer).map($name::from)
            }
        }
    };
}
