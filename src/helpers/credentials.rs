use base64::{engine::general_purpose::STANDARD, Engine as _};

/// `base64(id:secret)` with the standard alphabet, as used by HTTP Basic auth.
pub fn encode_basic_credentials(id: &str, secret: &str) -> String {
    STANDARD.encode(format!("{}:{}", id, secret))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_basic_auth_encoding() {
        assert_eq!(encode_basic_credentials("admin", "admin"), "YWRtaW46YWRtaW4=");
    }

    #[test]
    fn decodes_back_to_the_pair() {
        let encoded = encode_basic_credentials("Xk2_client", "s3cr:et/+");
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), "Xk2_client:s3cr:et/+");
    }
}
