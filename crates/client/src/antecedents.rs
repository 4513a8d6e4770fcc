//! Antecedent definition endpoints.
//!
//! The form engine consumes [`ApiClient::fetch_antecedent_blocks`] on every
//! form open; the remaining calls back the admin settings screen.

use crate::error::ApiResult;
use crate::http::ApiClient;
use cpn_forms::editor::DefinitionRequest;
use cpn_forms::AntecedentBlock;

impl ApiClient {
    /// Fetches the block definitions (`GET /antecedent`), optionally
    /// filtered by category. The filter is left off the query entirely
    /// when absent. The endpoint answers 204 when no definitions exist
    /// yet, which reads back as an empty list.
    pub async fn fetch_antecedent_blocks(
        &self,
        antecedent_type: Option<&str>,
    ) -> ApiResult<Vec<AntecedentBlock>> {
        let blocks = self
            .get_json_opt(
                "/antecedent",
                &[("antecedentType", antecedent_type.map(str::to_owned))],
            )
            .await?;
        Ok(blocks.unwrap_or_default())
    }

    /// Creates a definition (`POST /antecedent`); the backend answers with
    /// the created definition's name.
    pub async fn create_antecedent_definition(
        &self,
        request: &DefinitionRequest,
    ) -> ApiResult<String> {
        self.post_text("/antecedent", request).await
    }

    /// Updates a definition by id or code (`PUT /antecedent/{idOrCode}`).
    pub async fn update_antecedent_definition(
        &self,
        id_or_code: &str,
        request: &DefinitionRequest,
    ) -> ApiResult<AntecedentBlock> {
        self.put_json(&format!("/antecedent/{id_or_code}"), request)
            .await
    }

    /// Deletes a definition by id or code (`DELETE /antecedent/{idOrCode}`).
    pub async fn delete_antecedent_definition(&self, id_or_code: &str) -> ApiResult<()> {
        self.delete(&format!("/antecedent/{id_or_code}")).await
    }
}
