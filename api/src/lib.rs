pub mod contact;
pub mod page;

// the page is served by the relay itself, so the endpoint is a plain
// relative path with no url root in front of it
pub const CONTACT_PATH: &str = "/api/contact";
