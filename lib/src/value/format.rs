use serde::{de::DeserializeOwned, Serialize};

use crate::error::{ErrorDetail, Result};
use crate::value::{Source, Sink};

/// A serialization format for configuration and metadata files.
pub trait Format: Sized {
    /// The format's deserialization error type.
    type Error: serde::de::Error + ErrorDetail + 'static;

    /// The format's serialization error type.
    type SerError: serde::ser::Error + ErrorDetail + 'static;

    /// Parses `string` as the data format `Self` as a `T` or returns an error
    /// if the `string` is an invalid `T`. Usually called indirectly via
    /// [`Format::read()`].
    fn from_str<T: DeserializeOwned>(string: &str) -> Result<T, Self::Error>;

    /// Serializes `value` in a human-readable form.
    fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String, Self::SerError>;

    fn read<I: Source, T: DeserializeOwned>(input: I) -> Result<T> {
        let input = input.read()?;
        Ok(Self::from_str(&input)?)
    }

    fn write<O: Sink, T: Serialize + ?Sized>(value: &T, output: O) -> Result<()> {
        output.write(Self::to_string(value)?)
    }
}

macro_rules! impl_format {
    ($name:ident : $de:expr, $ser:expr, $E:ty, $S:ty) => (
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl Format for $name {
            type Error = $E;
            type SerError = $S;

            fn from_str<T: DeserializeOwned>(s: &str) -> Result<T, $E> {
                $de(s)
            }

            fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String, $S> {
                $ser(value)
            }
        }
    );
}

impl_format!(Toml: toml::from_str, toml::to_string_pretty, toml::de::Error, toml::ser::Error);
impl_format!(Json: serde_json::from_str, serde_json::to_string_pretty, serde_json::Error, serde_json::Error);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Buffer;

    #[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
    struct Entry {
        title: String,
        number: u32,
    }

    #[test]
    fn json_output_is_indented_and_keeps_unicode() {
        let buffer = Buffer::default();
        Json::write(&Entry { title: "옵시디언 첫걸음".into(), number: 1 }, &buffer).unwrap();

        let string = buffer.into_string();
        assert!(string.contains("\n  \"title\": \"옵시디언 첫걸음\""));
    }

    #[test]
    fn toml_errors_convert() {
        let result: Result<Entry> = Toml::read("title = 1");
        assert!(result.is_err());

        let entry: Entry = Toml::read("title = \"x\"\nnumber = 4").unwrap();
        assert_eq!(entry, Entry { title: "x".into(), number: 4 });
    }
}
