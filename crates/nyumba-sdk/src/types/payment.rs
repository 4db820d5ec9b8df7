//! M-Pesa push-payment schemas

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/payment/pay`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayRequest {
    /// Account paying (tenant id)
    pub sender_id: String,

    /// Payer MSISDN, e.g. `254712345678`
    pub phone: String,

    pub amount: Decimal,
}

/// Reply of `POST /api/payment/pay`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayResponse {
    /// Gateway reply relayed by the backend
    #[serde(rename = "mpesaRes", default)]
    pub mpesa_res: Option<MpesaResponse>,
}

/// STK push acknowledgement from the gateway
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MpesaResponse {
    #[serde(rename = "CheckoutRequestID", default)]
    pub checkout_request_id: Option<String>,

    #[serde(rename = "MerchantRequestID", default)]
    pub merchant_request_id: Option<String>,

    #[serde(default)]
    pub response_code: Option<String>,

    #[serde(default)]
    pub response_description: Option<String>,

    #[serde(default)]
    pub customer_message: Option<String>,

    /// Present instead of the fields above when the gateway refuses the push
    #[serde(rename = "errorMessage", default)]
    pub error_message: Option<String>,
}

impl MpesaResponse {
    /// Gateway code `"0"` means the push was accepted; an absent code is
    /// accepted unless an error message came back instead
    pub fn is_accepted(&self) -> bool {
        match self.response_code.as_deref().map(str::trim) {
            Some(code) => code == "0",
            None => self.error_message.is_none(),
        }
    }

    /// Correlation identifier used to query the payment status later
    pub fn correlation_id(&self) -> Option<&str> {
        self.checkout_request_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Best human-readable reason for a refused push
    pub fn rejection_reason(&self) -> String {
        self.error_message
            .as_deref()
            .or(self.response_description.as_deref())
            .unwrap_or("Payment request was not accepted")
            .to_string()
    }
}

/// Status reported by `GET /api/payment/status/:paymentId`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemotePaymentStatus {
    Success,
    Failed,
    Cancelled,
    Pending,
    /// Any status string this client does not know
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for RemotePaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RemotePaymentStatus::Success => "success",
            RemotePaymentStatus::Failed => "failed",
            RemotePaymentStatus::Cancelled => "cancelled",
            RemotePaymentStatus::Pending => "pending",
            RemotePaymentStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Reply of `GET /api/payment/status/:paymentId`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatusResponse {
    pub status: RemotePaymentStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// M-Pesa receipt number once the payment completed
    #[serde(default, alias = "mpesaReceiptNumber", skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
}
