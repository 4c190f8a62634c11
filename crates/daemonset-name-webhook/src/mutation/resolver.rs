use k8s_openapi::api::core::v1::{NodeSelectorRequirement, Pod};

const NODE_NAME_FIELD: &str = "metadata.name";
const OPERATOR_IN: &str = "In";

/// Returns the node the Pod is bound to, or constrained to by a required
/// node affinity on `metadata.name`.
///
/// A direct binding (`spec.nodeName`) always wins. Otherwise the first
/// `matchFields` requirement, in document order across all the required
/// node selector terms, that selects `metadata.name In [<one value>]`
/// provides the node name. Requirements listing several values, or using
/// any other operator, do not pin the Pod to a single node and are skipped.
pub fn resolve_node_name(pod: &Pod) -> Option<&str> {
    let spec = pod.spec.as_ref()?;

    if let Some(node_name) = spec.node_name.as_deref().filter(|name| !name.is_empty()) {
        return Some(node_name);
    }

    spec.affinity
        .as_ref()?
        .node_affinity
        .as_ref()?
        .required_during_scheduling_ignored_during_execution
        .as_ref()?
        .node_selector_terms
        .iter()
        .flat_map(|term| term.match_fields.iter().flatten())
        .find_map(single_node_name)
        .filter(|name| !name.is_empty())
}

fn single_node_name(requirement: &NodeSelectorRequirement) -> Option<&str> {
    if requirement.key != NODE_NAME_FIELD || requirement.operator != OPERATOR_IN {
        return None;
    }
    match requirement.values.as_deref() {
        Some([value]) => Some(value.as_str()),
        _ => None,
    }
}
