use async_trait::async_trait;

use crate::rpc::RawReply;

/// Hook invoked after a node accepts a broadcast, e.g. to push a notification.
#[async_trait]
pub trait BroadcastObserver: Send + Sync {
    async fn on_broadcast(&self, signed_tx: &str, reply: &RawReply);
}
