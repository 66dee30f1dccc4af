use anyhow::Result;
use async_trait::async_trait;

use crate::service::RelayInner;
use api::contact::ContactReq;

pub mod msg;
pub mod svc;

// these are the mail RPC calls that the mail service answers
//
// the caller gets the result through the RSMResp in the message; the
// RelayInner::respond return value only reports whether that reply got out
#[async_trait]
trait RelayMailService: RelayInner {
    async fn send_contact(&self, req: ContactReq) -> Result<()>;
}
