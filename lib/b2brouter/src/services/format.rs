use std::fmt;
use std::str::FromStr;

/// Document format identifier used by invoice downloads.
///
/// The identifier is both the last path segment of the download URL and the
/// `Accept` header value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// Rendered PDF (`pdf.invoice`).
    PdfInvoice,
    /// UBL Peppol BIS Billing 3.0 XML (`xml.ubl.invoice.bis3`).
    UblBis3,
    /// Spanish Facturae 3.2.2 XML (`xml.facturae.3.2.2`).
    Facturae322,
    /// Any other identifier supported by the account.
    Other(String),
}

impl DocumentFormat {
    /// The wire identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::PdfInvoice => "pdf.invoice",
            Self::UblBis3 => "xml.ubl.invoice.bis3",
            Self::Facturae322 => "xml.facturae.3.2.2",
            Self::Other(id) => id,
        }
    }

    /// Usual file extension for documents of this format.
    #[must_use]
    pub fn extension(&self) -> &str {
        match self {
            Self::PdfInvoice => "pdf",
            Self::UblBis3 | Self::Facturae322 => "xml",
            Self::Other(id) => id.split('.').next().unwrap_or("bin"),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for DocumentFormat {
    fn from(id: &str) -> Self {
        match id {
            "pdf.invoice" => Self::PdfInvoice,
            "xml.ubl.invoice.bis3" => Self::UblBis3,
            "xml.facturae.3.2.2" => Self::Facturae322,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for DocumentFormat {
    fn from(id: String) -> Self {
        Self::from(id.as_str())
    }
}

impl FromStr for DocumentFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}
