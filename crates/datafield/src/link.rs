//! Links to host pages.

use url::Url;

use crate::types::{DataId, FieldId};

/// Builds links to host endpoints.
pub trait UrlBuilder: Send + Sync {
    /// Link to the field display page of a data activity.
    ///
    /// `sesskey` is the anti-forgery token of the current session.
    fn field_display_url(
        &self,
        data_id: DataId,
        field_id: FieldId,
        mode: &str,
        sesskey: &str,
    ) -> String;
}

/// Builds links below the site root.
#[derive(Debug, Clone)]
pub struct WwwRootUrlBuilder {
    wwwroot: Url,
}

impl WwwRootUrlBuilder {
    /// Path of the field display endpoint below the site root.
    pub const FIELD_PAGE: &'static str = "mod/data/field.php";

    /// Creates a builder for the site rooted at `wwwroot`.
    pub fn new(wwwroot: &str) -> Result<Self, url::ParseError> {
        let mut wwwroot = Url::parse(wwwroot)?;
        if !wwwroot.path().ends_with('/') {
            let path = format!("{}/", wwwroot.path());
            wwwroot.set_path(&path);
        }
        Ok(Self { wwwroot })
    }

    /// Returns the site root.
    pub fn wwwroot(&self) -> &Url {
        &self.wwwroot
    }
}

impl UrlBuilder for WwwRootUrlBuilder {
    fn field_display_url(
        &self,
        data_id: DataId,
        field_id: FieldId,
        mode: &str,
        sesskey: &str,
    ) -> String {
        let mut url = self.wwwroot.clone();
        let path = format!("{}{}", self.wwwroot.path(), Self::FIELD_PAGE);
        url.set_path(&path);
        url.query_pairs_mut()
            .clear()
            .append_pair("d", &data_id.to_string())
            .append_pair("fid", &field_id.to_string())
            .append_pair("mode", mode)
            .append_pair("sesskey", sesskey);
        url.to_string()
    }
}
