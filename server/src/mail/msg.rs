use crate::service::{RSM, RSMResp};
use api::contact::ContactReq;

#[derive(Debug)]
pub enum MailMsg {
    // compose and dispatch one contact form submission; the response
    // carries the backend's error, if any, back to the http service
    SendContact {
        resp: RSMResp<()>,
        req: ContactReq,
    },
}

impl From<MailMsg> for RSM {
    fn from(value: MailMsg) -> Self {
        RSM::Mail(value)
    }
}
