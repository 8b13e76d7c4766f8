//! Content hashing for task list files

use sha2::{Digest, Sha256};

/// Returns the lowercase hex SHA-256 of the given content
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_hash() {
        assert_eq!(
            content_hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn hash_covers_exact_bytes() {
        let content = "x 2019-01-01 Task One +Project1 @Context1\n\
                       2019-01-02 Task Two +Project2 @Context2\n\
                       2019-03-05 Task Three +Project1 +Project2 @Context1";
        assert_eq!(
            content_hash(content),
            "4ef27c088837256efa400ddf45ba934a2f62125b2ecb83a4cdc468696c1208f8"
        );

        // A trailing newline is part of the content
        let terminated = format!("{}\n", content);
        assert_eq!(
            content_hash(&terminated),
            "399a33976715eaacaa62f2d3ccd6b06882f64e69f4cd1eb946690c2a4d6c7b0e"
        );
    }
}
