//! The admission pipeline: guard the resource type, decode the Pod, resolve
//! its node, compose and validate the new name, then answer with a JSON Patch.
//!
//! Every stage either advances or ends the request with a [`MutationError`],
//! there is no retry and no way back to an earlier stage.

mod errors;
mod naming;
mod node_filter;
mod patch;
mod resolver;

pub use errors::{MutationError, Result};
pub use naming::{
    compose_pod_name, is_dns1123_subdomain, sanitize_node_name, DNS1123_SUBDOMAIN_MAX_LENGTH,
};
pub use node_filter::NodeNameFilter;
pub use patch::{serialize_patch, PatchOp, PatchOperation, POD_NAME_PATH};
pub use resolver::resolve_node_name;

use k8s_openapi::api::core::v1::Pod;
use serde::Deserialize;
use tracing::{debug, warn, Span};

use crate::admission_response::AdmissionResponse;
use crate::admission_review::{AdmissionRequest, AdmissionReview, GroupVersionResource};

/// Decodes the outer envelope. Only structure is checked: the envelope must
/// parse and carry a request section, which is handed back next to the rest
/// of the envelope.
pub fn decode_review(body: &[u8]) -> Result<(AdmissionReview, AdmissionRequest)> {
    let mut review = AdmissionReview::from_slice(body).map_err(MutationError::DecodeReview)?;
    let request = review.request.take().ok_or(MutationError::MissingRequest)?;
    Ok((review, request))
}

/// Holds the read-only settings of the pipeline. A single instance is shared
/// by all the requests being served.
#[derive(Clone, Debug, Default)]
pub struct PodNamer {
    node_name_filter: NodeNameFilter,
}

impl PodNamer {
    pub fn new(node_name_filter: NodeNameFilter) -> Self {
        PodNamer { node_name_filter }
    }

    /// Runs the pipeline against one admission request.
    ///
    /// `span` receives the request fields (`request_uid`, `namespace`,
    /// `name`, `generate_name`, `new_name`) as soon as they are known, and
    /// scopes the events emitted here.
    pub fn mutate(&self, request: &AdmissionRequest, span: &Span) -> Result<AdmissionResponse> {
        span.record("request_uid", request.uid.as_str());

        if request.resource != GroupVersionResource::core_v1_pods() {
            return Err(MutationError::UnexpectedResource(request.resource.clone()));
        }

        let pod = decode_pod(request)?;
        let generate_name = pod.metadata.generate_name.as_deref().unwrap_or_default();
        span.record(
            "namespace",
            pod.metadata.namespace.as_deref().unwrap_or_default(),
        );
        span.record("name", pod.metadata.name.as_deref().unwrap_or_default());
        span.record("generate_name", generate_name);

        if generate_name.is_empty() {
            return Err(MutationError::GenerateNameEmpty);
        }

        let node_name = resolve_node_name(&pod).ok_or(MutationError::NodeNotAssigned)?;
        let node_name = match self.node_name_filter.apply(node_name) {
            Some(filtered) => filtered,
            None => {
                span.in_scope(|| {
                    warn!(
                        node_name,
                        "node name filter did not select anything, using the whole node name"
                    )
                });
                node_name
            }
        };

        let new_name = compose_pod_name(generate_name, node_name);
        span.record("new_name", new_name.as_str());

        let violations = is_dns1123_subdomain(&new_name);
        if !violations.is_empty() {
            return Err(MutationError::InvalidPodName(violations));
        }

        let patch = [PatchOperation::replace_pod_name(new_name)];
        span.in_scope(|| debug!(patch = ?patch, "patched"));
        let patch = serialize_patch(&patch)?;

        Ok(AdmissionResponse::patched(request.uid.clone(), &patch))
    }
}

pub(crate) fn decode_pod(request: &AdmissionRequest) -> Result<Pod> {
    let object = request.object.as_ref().ok_or(MutationError::MissingObject)?;
    Pod::deserialize(&object.0).map_err(MutationError::DecodePod)
}
