//! Storage blob format: a JSON array of `{id, text, completed}`.

use crate::domain::{DomainResult, Task};

pub fn encode(tasks: &[Task]) -> DomainResult<String> {
    Ok(serde_json::to_string(tasks)?)
}

pub fn decode(blob: &str) -> DomainResult<Vec<Task>> {
    Ok(serde_json::from_str(blob)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut done = Task::new("b", "walk the dog");
        done.completed = true;
        let tasks = vec![Task::new("a", "buy milk"), done];

        let blob = encode(&tasks).unwrap();
        assert_eq!(decode(&blob).unwrap(), tasks);
    }

    #[test]
    fn test_blob_shape() {
        let blob = encode(&[Task::new("a", "buy milk")]).unwrap();
        assert_eq!(blob, r#"[{"id":"a","text":"buy milk","completed":false}]"#);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("{not json").is_err());
        assert!(decode(r#"{"id":"a"}"#).is_err());
    }
}
