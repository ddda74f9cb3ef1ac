//! Dropdown option loaders

use super::executor::GetResponseNode;
use crate::description::{LOAD_CAMPAIGNS, LOAD_CUSTOM_FIELDS, LOAD_TAGS};
use crate::error::{Error, Result};
use crate::http::RequestConfig;
use crate::schema::{decode_list, Campaign, CustomField, NamedEntity, Tag};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One dropdown entry: label and stored value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeOption {
    pub name: String,
    pub value: String,
}

impl GetResponseNode {
    /// Campaigns as `{name, value: campaignId}`
    pub async fn load_campaigns(&self) -> Result<Vec<NodeOption>> {
        self.load_named::<Campaign>("/campaigns", "campaigns").await
    }

    /// Tags as `{name, value: tagId}`
    pub async fn load_tags(&self) -> Result<Vec<NodeOption>> {
        self.load_named::<Tag>("/tags", "tags").await
    }

    /// Custom fields as `{name, value: customFieldId}`
    pub async fn load_custom_fields(&self) -> Result<Vec<NodeOption>> {
        self.load_named::<CustomField>("/custom-fields", "custom fields")
            .await
    }

    /// Run the loader a property names in `load_options_method`
    pub async fn load_options(&self, method: &str) -> Result<Vec<NodeOption>> {
        match method {
            LOAD_CAMPAIGNS => self.load_campaigns().await,
            LOAD_TAGS => self.load_tags().await,
            LOAD_CUSTOM_FIELDS => self.load_custom_fields().await,
            other => Err(Error::unsupported("loadOptions", other)),
        }
    }

    async fn load_named<T>(&self, path: &str, what: &str) -> Result<Vec<NodeOption>>
    where
        T: DeserializeOwned + NamedEntity,
    {
        let response = self.client().get(path, RequestConfig::new()).await?;
        let entities: Vec<T> = decode_list(response.body, what)?;
        debug!("Loaded {} {what}", entities.len());

        Ok(entities
            .iter()
            .map(|entity| NodeOption {
                name: entity.name().to_string(),
                value: entity.id().to_string(),
            })
            .collect())
    }
}
