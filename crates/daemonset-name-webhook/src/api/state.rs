use crate::{config::RejectionMode, mutation::PodNamer};

pub(crate) struct ApiServerState {
    pub(crate) hostname: String,
    pub(crate) pod_namer: PodNamer,
    pub(crate) rejection_mode: RejectionMode,
}
