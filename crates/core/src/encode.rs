//! Base64 and URL percent-encoding helpers.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::Error;

pub fn base64_encode(input: &str) -> Result<String, Error> {
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(STANDARD.encode(input))
}

pub fn base64_decode(input: &str) -> Result<String, Error> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyInput);
    }
    let bytes = STANDARD
        .decode(trimmed)
        .map_err(|e| Error::invalid("Base64", e.to_string()))?;
    String::from_utf8(bytes)
        .map_err(|_| Error::invalid("Base64", "decoded bytes are not valid UTF-8"))
}

pub fn url_encode(input: &str) -> Result<String, Error> {
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(urlencoding::encode(input).into_owned())
}

pub fn url_decode(input: &str) -> Result<String, Error> {
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }
    urlencoding::decode(input)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| Error::invalid("URL", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_round_trip() {
        let encoded = base64_encode("hello world").unwrap();
        assert_eq!(encoded, "aGVsbG8gd29ybGQ=");
        assert_eq!(base64_decode(&encoded).unwrap(), "hello world");
    }

    #[test]
    fn test_base64_decode_rejects_garbage() {
        let err = base64_decode("not base64!!!").unwrap_err();
        assert!(err.to_string().starts_with("invalid Base64"));
    }

    #[test]
    fn test_url_round_trip() {
        let encoded = url_encode("a b&c=d").unwrap();
        assert_eq!(encoded, "a%20b%26c%3Dd");
        assert_eq!(url_decode(&encoded).unwrap(), "a b&c=d");
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(base64_encode(""), Err(Error::EmptyInput)));
        assert!(matches!(base64_decode(" "), Err(Error::EmptyInput)));
        assert!(matches!(url_encode(""), Err(Error::EmptyInput)));
        assert!(matches!(url_decode(""), Err(Error::EmptyInput)));
    }
}
