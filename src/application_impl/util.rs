use crate::application_port::*;
use crate::domain_model::*;

/// A 2xx whose envelope still says `success: false` is a failure too.
pub(crate) fn successful(envelope: ApiEnvelope) -> Result<ApiEnvelope, ApiError> {
    if envelope.success {
        Ok(envelope)
    } else {
        Err(ApiError::Request {
            status: envelope.status,
            message: envelope.message_or("request was not successful"),
        })
    }
}

pub(crate) async fn send_for_message(
    client: &dyn ApiClient,
    request: ApiRequest,
    default_message: &str,
) -> Result<ApiMessage, ApiError> {
    let envelope = successful(client.send(&request).await?)?;
    Ok(ApiMessage::from_envelope(&envelope, default_message))
}
