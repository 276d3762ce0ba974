use jiff::civil::Date;
use uphcs_core::api_paths;
use uphcs_core::models::document::{DocumentFolder, DocumentKind, DocumentListing};
use uphcs_workflow::documents;

use crate::client::ApiClient;
use crate::error::ClientError;

/// An exported PDF, named the way the backend asked.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ApiClient {
    /// Document folders, newest first.
    pub async fn documents(&self, patient_id: i64) -> Result<Vec<DocumentFolder>, ClientError> {
        let listing: DocumentListing = self.get_json(&api_paths::documents(patient_id)).await?;
        Ok(documents::normalize(listing))
    }

    /// Download the PDF for `kind` on `date`. Checked against `folders`
    /// first, so no request is made for a date without documents.
    pub async fn export_document(
        &self,
        folders: &[DocumentFolder],
        patient_id: i64,
        date: Date,
        kind: DocumentKind,
    ) -> Result<PdfDocument, ClientError> {
        let path = documents::export_path(folders, patient_id, date, kind)?;
        let download = self.get_bytes(&path).await?;
        let filename = documents::download_filename(download.content_disposition.as_deref(), kind, date);
        tracing::info!(patient_id, %date, kind = kind.as_str(), %filename, bytes = download.bytes.len(), "document exported");
        Ok(PdfDocument {
            filename,
            bytes: download.bytes,
        })
    }
}
