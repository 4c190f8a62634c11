use lazy_static::lazy_static;
use regex::Regex;

pub const DNS1123_SUBDOMAIN_MAX_LENGTH: usize = 253;

const DNS1123_LABEL_FMT: &str = "[a-z0-9]([-a-z0-9]*[a-z0-9])?";
const DNS1123_SUBDOMAIN_ERROR_MSG: &str = "a lowercase RFC 1123 subdomain must consist of lower case alphanumeric characters, '-' or '.', and must start and end with an alphanumeric character";

lazy_static! {
    static ref DNS1123_SUBDOMAIN_FMT: String =
        format!("{DNS1123_LABEL_FMT}(\\.{DNS1123_LABEL_FMT})*");
    static ref DNS1123_SUBDOMAIN_REGEX: Regex =
        Regex::new(&format!("^{}$", DNS1123_SUBDOMAIN_FMT.as_str()))
            .expect("the DNS-1123 subdomain expression is valid");
}

/// Node hostnames may contain underscores, object names may not.
/// Nothing else is rewritten.
pub fn sanitize_node_name(node_name: &str) -> String {
    node_name.replace('_', "-")
}

/// `generate_name` followed by the sanitized node name. No separator is
/// added and the result is never truncated.
pub fn compose_pod_name(generate_name: &str, node_name: &str) -> String {
    format!("{generate_name}{}", sanitize_node_name(node_name))
}

/// Checks `value` against the Kubernetes DNS-1123 subdomain rules.
/// Returns every violated rule, an empty list means the name is valid.
pub fn is_dns1123_subdomain(value: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if value.len() > DNS1123_SUBDOMAIN_MAX_LENGTH {
        errors.push(format!(
            "must be no more than {DNS1123_SUBDOMAIN_MAX_LENGTH} characters"
        ));
    }
    if !DNS1123_SUBDOMAIN_REGEX.is_match(value) {
        errors.push(format!(
            "{DNS1123_SUBDOMAIN_ERROR_MSG} (e.g. 'example.com', regex used for validation is '{}')",
            DNS1123_SUBDOMAIN_FMT.as_str()
        ));
    }

    errors
}
