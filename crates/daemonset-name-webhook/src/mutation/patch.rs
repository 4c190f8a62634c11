use serde::{Deserialize, Serialize};

use crate::mutation::errors::{MutationError, Result};

pub const POD_NAME_PATH: &str = "/metadata/name";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Replace,
}

/// A single RFC 6902 operation. Replacing the object name is the only
/// mutation this webhook performs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,
    pub value: String,
}

impl PatchOperation {
    pub fn replace_pod_name(name: String) -> Self {
        PatchOperation {
            op: PatchOp::Replace,
            path: String::from(POD_NAME_PATH),
            value: name,
        }
    }
}

pub fn serialize_patch(patch: &[PatchOperation]) -> Result<Vec<u8>> {
    serde_json::to_vec(patch).map_err(MutationError::PatchSerialization)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format() {
        let patch = [PatchOperation::replace_pod_name(String::from("worker-node-1"))];

        assert_eq!(
            String::from_utf8(serialize_patch(&patch).unwrap()).unwrap(),
            r#"[{"op":"replace","path":"/metadata/name","value":"worker-node-1"}]"#
        );
    }
}
