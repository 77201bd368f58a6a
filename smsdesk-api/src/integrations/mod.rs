pub mod sms;
pub mod twilio;

pub use sms::{build_transport, DisabledTransport, SmsTransport, TransportError};
pub use twilio::TwilioClient;
