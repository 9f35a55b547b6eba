//! Flow editor facade
//!
//! Composes the graph store with the node kind catalog and output
//! contract: adding nodes seeds kind-specific defaults, field edits
//! recompute the edited node's own output, and the async actions
//! (selection, upload, chat, generation) apply their results back
//! through the store's single update entry point.
//!
//! Downstream propagation stays pull-based: the editor never walks the
//! graph to refresh dependents. Hosts call [`FlowEditor::refresh_output`]
//! when a node renders, which recomputes that node's output from its
//! freshly resolved inputs.

use std::sync::Arc;

use serde_json::json;

use designflow_remote::{
    ChatClient, ChatMessage, FileStorage, Filter, GenerationClient, RecordStore, Session,
};
use flow_engine::{
    resolve_upstream, Connection, EdgeId, EventSink, Flow, FlowEvent, FlowStore, NodeId, NodeKind,
    NodeOutput, NullEventSink, Position, UpstreamInputMap,
};

use crate::catalog::{
    default_fields, metadata, selector_filter_column, selector_resource,
};
use crate::chat::ChatFields;
use crate::error::{NodeActionError, Result};
use crate::generator::{CarouselFields, GeneratorFields};
use crate::output::compute_output;
use crate::selector::{SelectOption, SelectorFields};
use crate::support::ReferenceImageFields;

fn as_patch(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}

/// The flow editor: graph store plus node behavior
pub struct FlowEditor {
    store: FlowStore,
    events: Arc<dyn EventSink>,
}

impl FlowEditor {
    /// Create an editor around a flow, with an event consumer
    pub fn new(flow: Flow, events: Arc<dyn EventSink>) -> Self {
        Self {
            store: FlowStore::new(flow, events.clone()),
            events,
        }
    }

    /// Create an editor with no event consumer
    pub fn headless(flow: Flow) -> Self {
        Self::new(flow, Arc::new(NullEventSink))
    }

    /// The current flow state
    pub fn flow(&self) -> &Flow {
        self.store.flow()
    }

    /// The underlying store, for host-level operations (undo, rename)
    pub fn store_mut(&mut self) -> &mut FlowStore {
        &mut self.store
    }

    fn node_kind(&self, node_id: &str) -> Result<NodeKind> {
        self.store
            .flow()
            .find_node(node_id)
            .map(|n| n.kind)
            .ok_or_else(|| {
                NodeActionError::Engine(flow_engine::FlowEngineError::NodeNotFound(
                    node_id.to_string(),
                ))
            })
    }

    fn expect_kind(&self, node_id: &str, kind: NodeKind, expected: &'static str) -> Result<()> {
        if self.node_kind(node_id)? != kind {
            return Err(NodeActionError::WrongKind {
                node_id: node_id.to_string(),
                expected,
            });
        }
        Ok(())
    }

    fn notify_error(&self, message: String) {
        log::warn!("{}", message);
        self.events.send(FlowEvent::error(message));
    }

    /// Add a node with its kind-specific default fields and no output
    pub fn add_node(&mut self, kind: NodeKind, label: &str, position: Position) -> NodeId {
        let mut fields = default_fields(kind);
        fields.insert("label".to_string(), json!(label));
        self.store.add_node(kind, position, fields)
    }

    /// Merge a field patch into a node and recompute its own output
    pub fn update_fields(
        &mut self,
        node_id: &str,
        patch: serde_json::Map<String, serde_json::Value>,
    ) -> Result<()> {
        self.store.update_node_data(node_id, patch)?;
        self.refresh_output(node_id)?;
        Ok(())
    }

    /// Connect two nodes; duplicates are silently ignored by the store
    pub fn connect(&mut self, connection: Connection) -> Result<EdgeId> {
        Ok(self.store.connect(connection)?)
    }

    /// Remove an edge; dependents reconcile on their next recomputation
    pub fn remove_edge(&mut self, edge_id: &str) -> Result<()> {
        Ok(self.store.remove_edge(edge_id)?)
    }

    /// Remove a node and its incident edges
    pub fn remove_node(&mut self, node_id: &str) -> Result<()> {
        Ok(self.store.remove_node(node_id)?)
    }

    /// Resolve the inputs currently visible to a node
    pub fn resolved_inputs(&self, node_id: &str) -> UpstreamInputMap {
        resolve_upstream(self.store.flow(), node_id)
    }

    /// Whether a node's interaction is disabled (required upstream absent)
    pub fn is_node_disabled(&self, node_id: &str) -> bool {
        match self.node_kind(node_id) {
            Ok(kind) => crate::catalog::is_disabled(kind, &self.resolved_inputs(node_id)),
            Err(_) => true,
        }
    }

    /// Recompute a node's output from its current fields and inputs
    ///
    /// Hosts call this when a node renders; the write is skipped when the
    /// output did not change.
    pub fn refresh_output(&mut self, node_id: &str) -> Result<Option<NodeOutput>> {
        let upstream = self.resolved_inputs(node_id);
        let node = self.store.flow().find_node(node_id).ok_or_else(|| {
            NodeActionError::Engine(flow_engine::FlowEngineError::NodeNotFound(
                node_id.to_string(),
            ))
        })?;
        let next = compute_output(node, &upstream);
        if node.data.output != next {
            self.store.set_output(node_id, next.clone())?;
        }
        Ok(next)
    }

    // ------------------------------------------------------------------
    // Selector actions
    // ------------------------------------------------------------------

    fn selector_resource_for(&self, node_id: &str) -> Result<&'static str> {
        let kind = self.node_kind(node_id)?;
        selector_resource(kind).ok_or(NodeActionError::WrongKind {
            node_id: node_id.to_string(),
            expected: "selector",
        })
    }

    /// Fetch the option list for a selector, filtered by its upstream
    ///
    /// With the required upstream disconnected the list is cleared
    /// instead of fetched, which disables selection in the UI. Fetch
    /// failures notify the user and leave the node untouched.
    pub async fn load_options(
        &mut self,
        node_id: &str,
        records: &dyn RecordStore,
    ) -> Result<()> {
        let resource = self.selector_resource_for(node_id)?;
        let kind = self.node_kind(node_id)?;
        let upstream = self.resolved_inputs(node_id);

        let mut filters = Vec::new();
        if let Some(required) = metadata(kind).required_upstream {
            match upstream.get(required.as_key()) {
                Some(parent) => {
                    let column = selector_filter_column(kind).unwrap_or("id");
                    filters.push(Filter::eq(column, parent.id.clone()));
                }
                None => {
                    log::debug!(
                        "Selector {} has no {} upstream; clearing options",
                        node_id,
                        required.as_key()
                    );
                    self.update_fields(node_id, as_patch(json!({ "options": [] })))?;
                    return Ok(());
                }
            }
        }

        match records.list(resource, &filters).await {
            Ok(list) => {
                let options: Vec<SelectOption> =
                    list.iter().filter_map(SelectOption::from_record).collect();
                self.update_fields(node_id, as_patch(json!({ "options": options })))?;
            }
            Err(e) => {
                self.notify_error(format!("Falha ao carregar a lista: {}", e));
            }
        }
        Ok(())
    }

    /// Start a request on a node, returning its monotonic token
    ///
    /// Also raises the node's loading flag. The token must be handed back
    /// to [`FlowEditor::apply_selection`]; completions carrying an older
    /// token than the node's current one are discarded.
    pub fn begin_request(&mut self, node_id: &str) -> Result<u64> {
        let current = self
            .store
            .flow()
            .find_node(node_id)
            .and_then(|n| n.data.u64_field("request_seq"))
            .unwrap_or(0);
        let token = current + 1;
        self.update_fields(
            node_id,
            as_patch(json!({ "request_seq": token, "loading": true })),
        )?;
        Ok(token)
    }

    /// Apply a completed selection fetch, unless it has gone stale
    ///
    /// Returns whether the completion was applied.
    pub fn apply_selection(
        &mut self,
        node_id: &str,
        token: u64,
        item_id: &str,
        record: serde_json::Value,
    ) -> Result<bool> {
        let current = self
            .store
            .flow()
            .find_node(node_id)
            .and_then(|n| n.data.u64_field("request_seq"))
            .unwrap_or(0);
        if token < current {
            log::debug!(
                "Discarding stale selection on {} (token {} < {})",
                node_id,
                token,
                current
            );
            return Ok(false);
        }
        self.update_fields(
            node_id,
            as_patch(json!({
                "selected_id": item_id,
                "selected_record": record,
                "loading": false,
            })),
        )?;
        Ok(true)
    }

    /// Clear the loading flag if `token` is still the current request
    fn finish_request(&mut self, node_id: &str, token: u64) -> Result<()> {
        let current = self
            .store
            .flow()
            .find_node(node_id)
            .and_then(|n| n.data.u64_field("request_seq"))
            .unwrap_or(0);
        if token == current {
            self.update_fields(node_id, as_patch(json!({ "loading": false })))?;
        }
        Ok(())
    }

    /// Select an item on a selector node
    ///
    /// Fetches the item's full record before exposing it as output. On
    /// fetch failure the user is notified and the node keeps its prior
    /// selection and output.
    pub async fn select_item(
        &mut self,
        node_id: &str,
        item_id: &str,
        records: &dyn RecordStore,
    ) -> Result<()> {
        let resource = self.selector_resource_for(node_id)?;
        let token = self.begin_request(node_id)?;

        match records.get(resource, item_id).await {
            Ok(Some(record)) => {
                self.apply_selection(node_id, token, item_id, record)?;
            }
            Ok(None) => {
                self.finish_request(node_id, token)?;
                self.notify_error(format!("Registro '{}' não encontrado", item_id));
            }
            Err(e) => {
                self.finish_request(node_id, token)?;
                self.notify_error(format!("Falha ao carregar o registro: {}", e));
            }
        }
        Ok(())
    }

    /// Create a knowledge-source record and select it
    ///
    /// The record is scoped to the connected client and owned by the
    /// session user. Insert failures notify and leave the node untouched.
    pub async fn create_knowledge_source(
        &mut self,
        node_id: &str,
        title: &str,
        content: &str,
        records: &dyn RecordStore,
        session: &Session,
    ) -> Result<()> {
        self.expect_kind(node_id, NodeKind::Knowledge, "knowledge selector")?;
        let upstream = self.resolved_inputs(node_id);
        let client = upstream
            .get(NodeKind::Client.as_key())
            .ok_or(NodeActionError::MissingUpstream {
                node_id: node_id.to_string(),
                missing: "client",
            })?;

        let record = json!({
            "id": uuid::Uuid::new_v4().to_string(),
            "client_id": client.id,
            "title": title,
            "content": content,
            "owner": session.user_id,
        });

        match records.insert("knowledge_sources", record).await {
            Ok(stored) => {
                let Some(option) = SelectOption::from_record(&stored) else {
                    self.notify_error("Registro criado sem id".to_string());
                    return Ok(());
                };
                let fields: SelectorFields = self
                    .store
                    .flow()
                    .find_node(node_id)
                    .map(|n| n.data.parse_fields().unwrap_or_default())
                    .unwrap_or_default();
                let mut options = fields.options;
                options.push(option.clone());
                self.update_fields(node_id, as_patch(json!({ "options": options })))?;

                let token = self.begin_request(node_id)?;
                self.apply_selection(node_id, token, &option.id, stored)?;
            }
            Err(e) => {
                self.notify_error(format!("Falha ao salvar o conhecimento: {}", e));
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Upload actions
    // ------------------------------------------------------------------

    /// Upload a reference image and append its public URL to the node
    pub async fn upload_reference_image(
        &mut self,
        node_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
        storage: &dyn FileStorage,
        session: &Session,
    ) -> Result<()> {
        self.expect_kind(node_id, NodeKind::ReferenceImage, "reference image")?;
        let flow_id = self.store.flow().id.clone();
        self.update_fields(node_id, as_patch(json!({ "uploading": true })))?;

        match storage
            .upload(&session.user_id, &flow_id, "reference_images", file_name, bytes)
            .await
        {
            Ok(url) => {
                let fields: ReferenceImageFields = self
                    .store
                    .flow()
                    .find_node(node_id)
                    .map(|n| n.data.parse_fields().unwrap_or_default())
                    .unwrap_or_default();
                let mut urls = fields.urls;
                let mut instructions = fields.instructions;
                instructions.resize(urls.len(), String::new());
                urls.push(url);
                instructions.push(String::new());
                self.update_fields(
                    node_id,
                    as_patch(json!({
                        "urls": urls,
                        "instructions": instructions,
                        "uploading": false,
                    })),
                )?;
            }
            Err(e) => {
                self.update_fields(node_id, as_patch(json!({ "uploading": false })))?;
                self.notify_error(format!("Falha no upload da referência: {}", e));
            }
        }
        Ok(())
    }

    /// Upload a logo and set it as the node's URL
    pub async fn upload_logo(
        &mut self,
        node_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
        storage: &dyn FileStorage,
        session: &Session,
    ) -> Result<()> {
        self.expect_kind(node_id, NodeKind::Logo, "logo")?;
        let flow_id = self.store.flow().id.clone();
        self.update_fields(node_id, as_patch(json!({ "uploading": true })))?;

        match storage
            .upload(&session.user_id, &flow_id, "logos", file_name, bytes)
            .await
        {
            Ok(url) => {
                self.update_fields(
                    node_id,
                    as_patch(json!({ "url": url, "uploading": false })),
                )?;
            }
            Err(e) => {
                self.update_fields(node_id, as_patch(json!({ "uploading": false })))?;
                self.notify_error(format!("Falha no upload do logo: {}", e));
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Chat and generation actions
    // ------------------------------------------------------------------

    /// Send a user message through the chat proxy
    ///
    /// On failure nothing is applied: the user's message is not kept and
    /// the node's output is unchanged.
    pub async fn send_chat(
        &mut self,
        node_id: &str,
        text: &str,
        client: &dyn ChatClient,
    ) -> Result<()> {
        self.expect_kind(node_id, NodeKind::Chat, "chat")?;
        let fields: ChatFields = self
            .store
            .flow()
            .find_node(node_id)
            .map(|n| n.data.parse_fields().unwrap_or_default())
            .unwrap_or_default();

        let mut messages = fields.messages;
        messages.push(ChatMessage::user(text));

        self.update_fields(node_id, as_patch(json!({ "pending": true })))?;
        match client.complete(&messages).await {
            Ok(reply) => {
                messages.push(ChatMessage::assistant(reply));
                self.update_fields(
                    node_id,
                    as_patch(json!({ "messages": messages, "pending": false })),
                )?;
            }
            Err(e) => {
                self.update_fields(node_id, as_patch(json!({ "pending": false })))?;
                self.notify_error(format!("Falha no chat: {}", e));
            }
        }
        Ok(())
    }

    /// Run generation for an image generator or carousel node
    ///
    /// Assembles the config(s) from the node's fields and resolved
    /// support outputs, submits them, and stores the returned assets on
    /// the node. Failures notify and leave prior assets in place.
    pub async fn generate(
        &mut self,
        node_id: &str,
        client: &dyn GenerationClient,
    ) -> Result<()> {
        let kind = self.node_kind(node_id)?;
        let upstream = self.resolved_inputs(node_id);
        let node = self.store.flow().find_node(node_id).ok_or_else(|| {
            NodeActionError::Engine(flow_engine::FlowEngineError::NodeNotFound(
                node_id.to_string(),
            ))
        })?;

        let configs = match kind {
            NodeKind::ImageGenerator => {
                let fields: GeneratorFields = node.data.parse_fields()?;
                vec![fields.assemble_config(&upstream)]
            }
            NodeKind::Carousel => {
                let fields: CarouselFields = node.data.parse_fields()?;
                fields.slide_configs(&upstream)
            }
            _ => {
                return Err(NodeActionError::WrongKind {
                    node_id: node_id.to_string(),
                    expected: "generator",
                })
            }
        };
        if configs.is_empty() {
            self.notify_error("Nenhum slide para gerar".to_string());
            return Ok(());
        }

        self.update_fields(node_id, as_patch(json!({ "generating": true })))?;
        let mut assets = Vec::new();
        for config in &configs {
            match client.generate(config).await {
                Ok(mut generated) => assets.append(&mut generated),
                Err(e) => {
                    self.update_fields(node_id, as_patch(json!({ "generating": false })))?;
                    self.notify_error(format!("Falha na geração: {}", e));
                    return Ok(());
                }
            }
        }
        self.update_fields(
            node_id,
            as_patch(json!({ "assets": assets, "generating": false })),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use designflow_remote::mock::{
        MockChatClient, MockFileStorage, MockGenerationClient, MockRecordStore,
    };
    use designflow_remote::Role;
    use flow_engine::{FlowEvent, NotificationLevel, VecEventSink};

    fn session() -> Session {
        Session::new("u1", vec![Role::Owner])
    }

    fn seeded_records() -> MockRecordStore {
        let records = MockRecordStore::new();
        records.seed(
            "clients",
            vec![
                serde_json::json!({"id": "c1", "name": "Acme"}),
                serde_json::json!({"id": "c2", "name": "Globex"}),
            ],
        );
        records.seed(
            "campaigns",
            vec![
                serde_json::json!({"id": "m1", "client_id": "c1", "name": "Natal"}),
                serde_json::json!({"id": "m2", "client_id": "c2", "name": "Verão"}),
            ],
        );
        records
    }

    fn editor() -> FlowEditor {
        FlowEditor::headless(Flow::new("f1", "Teste", "u1"))
    }

    async fn select_client(
        editor: &mut FlowEditor,
        node_id: &str,
        records: &MockRecordStore,
        client_id: &str,
    ) {
        editor.load_options(node_id, records).await.unwrap();
        editor.select_item(node_id, client_id, records).await.unwrap();
    }

    #[tokio::test]
    async fn client_selection_sets_output() {
        let mut editor = editor();
        let records = seeded_records();
        let client = editor.add_node(NodeKind::Client, "Cliente", Position::default());

        select_client(&mut editor, &client, &records, "c1").await;

        let node = editor.flow().find_node(&client).unwrap();
        let output = node.data.output.as_ref().unwrap();
        assert_eq!(output.id, "c1");
        assert_eq!(output.data["name"], serde_json::json!("Acme"));
        assert!(!node.data.bool_field("loading"));
    }

    #[tokio::test]
    async fn campaign_options_are_filtered_by_connected_client() {
        let mut editor = editor();
        let records = seeded_records();
        let client = editor.add_node(NodeKind::Client, "Cliente", Position::default());
        let campaign = editor.add_node(NodeKind::Campaign, "Campanha", Position::default());
        editor.connect(Connection::new(client.clone(), campaign.clone())).unwrap();

        // Disabled until the client has a selection.
        assert!(editor.is_node_disabled(&campaign));

        select_client(&mut editor, &client, &records, "c1").await;
        assert!(!editor.is_node_disabled(&campaign));

        editor.load_options(&campaign, &records).await.unwrap();
        let fields: SelectorFields = editor
            .flow()
            .find_node(&campaign)
            .unwrap()
            .data
            .parse_fields()
            .unwrap();
        assert_eq!(fields.options.len(), 1);
        assert_eq!(fields.options[0].id, "m1");
    }

    #[tokio::test]
    async fn disconnected_upstream_clears_options() {
        let mut editor = editor();
        let records = seeded_records();
        let client = editor.add_node(NodeKind::Client, "Cliente", Position::default());
        let campaign = editor.add_node(NodeKind::Campaign, "Campanha", Position::default());
        let edge = editor
            .connect(Connection::new(client.clone(), campaign.clone()))
            .unwrap();

        select_client(&mut editor, &client, &records, "c1").await;
        editor.load_options(&campaign, &records).await.unwrap();

        editor.remove_edge(&edge).unwrap();
        editor.load_options(&campaign, &records).await.unwrap();

        let fields: SelectorFields = editor
            .flow()
            .find_node(&campaign)
            .unwrap()
            .data
            .parse_fields()
            .unwrap();
        assert!(fields.options.is_empty());
        assert!(editor.is_node_disabled(&campaign));
    }

    #[tokio::test]
    async fn stale_selection_completion_is_discarded() {
        let mut editor = editor();
        let client = editor.add_node(NodeKind::Client, "Cliente", Position::default());

        // Two requests race; the older one completes last.
        let first = editor.begin_request(&client).unwrap();
        let second = editor.begin_request(&client).unwrap();
        assert!(first < second);

        let applied = editor
            .apply_selection(&client, second, "c2", serde_json::json!({"id": "c2"}))
            .unwrap();
        assert!(applied);

        let stale = editor
            .apply_selection(&client, first, "c1", serde_json::json!({"id": "c1"}))
            .unwrap();
        assert!(!stale);

        let node = editor.flow().find_node(&client).unwrap();
        assert_eq!(node.data.str_field("selected_id"), "c2");
    }

    #[tokio::test]
    async fn failed_fetch_notifies_and_keeps_prior_output() {
        let sink = Arc::new(VecEventSink::new());
        let mut editor = FlowEditor::new(Flow::new("f1", "Teste", "u1"), sink.clone());
        let records = seeded_records();
        let client = editor.add_node(NodeKind::Client, "Cliente", Position::default());

        select_client(&mut editor, &client, &records, "c1").await;

        records.fail_with("offline");
        editor.select_item(&client, "c2", &records).await.unwrap();

        let node = editor.flow().find_node(&client).unwrap();
        // Prior selection and output survive the failure.
        assert_eq!(node.data.output.as_ref().unwrap().id, "c1");
        assert!(!node.data.bool_field("loading"));
        assert!(sink.events().iter().any(|e| matches!(
            e,
            FlowEvent::Notification {
                level: NotificationLevel::Error,
                ..
            }
        )));
    }

    #[tokio::test]
    async fn knowledge_source_creation_selects_new_record() {
        let mut editor = editor();
        let records = seeded_records();
        let client = editor.add_node(NodeKind::Client, "Cliente", Position::default());
        let knowledge = editor.add_node(NodeKind::Knowledge, "Base", Position::default());
        editor.connect(Connection::new(client.clone(), knowledge.clone())).unwrap();

        select_client(&mut editor, &client, &records, "c1").await;
        editor
            .create_knowledge_source(
                &knowledge,
                "Guia da marca",
                "Tom de voz informal",
                &records,
                &session(),
            )
            .await
            .unwrap();

        let node = editor.flow().find_node(&knowledge).unwrap();
        let output = node.data.output.as_ref().unwrap();
        assert_eq!(output.data["title"], serde_json::json!("Guia da marca"));
        assert_eq!(output.data["client_id"], serde_json::json!("c1"));
    }

    #[tokio::test]
    async fn knowledge_creation_without_client_is_an_error() {
        let mut editor = editor();
        let records = seeded_records();
        let knowledge = editor.add_node(NodeKind::Knowledge, "Base", Position::default());

        let result = editor
            .create_knowledge_source(&knowledge, "t", "c", &records, &session())
            .await;
        assert!(matches!(
            result,
            Err(NodeActionError::MissingUpstream { .. })
        ));
    }

    #[tokio::test]
    async fn reference_upload_appends_url_and_clears_flag() {
        let mut editor = editor();
        let storage = MockFileStorage::new();
        let reference = editor.add_node(NodeKind::ReferenceImage, "Referência", Position::default());

        editor
            .upload_reference_image(&reference, "moodboard.png", vec![1, 2], &storage, &session())
            .await
            .unwrap();

        let node = editor.flow().find_node(&reference).unwrap();
        let fields: ReferenceImageFields = node.data.parse_fields().unwrap();
        assert_eq!(fields.urls.len(), 1);
        assert!(fields.urls[0].ends_with("moodboard.png"));
        assert!(!fields.uploading);
        // Output now carries the uploaded URL.
        assert!(node.data.output.is_some());
    }

    #[tokio::test]
    async fn failed_upload_notifies_and_applies_nothing() {
        let sink = Arc::new(VecEventSink::new());
        let mut editor = FlowEditor::new(Flow::new("f1", "Teste", "u1"), sink.clone());
        let storage = MockFileStorage::new();
        storage.fail_with("bucket indisponível");
        let logo = editor.add_node(NodeKind::Logo, "Logo", Position::default());

        editor
            .upload_logo(&logo, "logo.svg", vec![1], &storage, &session())
            .await
            .unwrap();

        let node = editor.flow().find_node(&logo).unwrap();
        assert_eq!(node.data.str_field("url"), "");
        assert!(!node.data.bool_field("uploading"));
        assert!(node.data.output.is_none());
        assert!(sink
            .events()
            .iter()
            .any(|e| matches!(e, FlowEvent::Notification { .. })));
    }

    #[tokio::test]
    async fn chat_reply_becomes_output() {
        let mut editor = editor();
        let chat_client = MockChatClient::new("Compre já, pague depois");
        let chat = editor.add_node(NodeKind::Chat, "Chat", Position::default());

        editor
            .send_chat(&chat, "escreva um slogan", &chat_client)
            .await
            .unwrap();

        let node = editor.flow().find_node(&chat).unwrap();
        let fields: ChatFields = node.data.parse_fields().unwrap();
        assert_eq!(fields.messages.len(), 2);
        assert_eq!(
            node.data.output.as_ref().unwrap().data["text"],
            serde_json::json!("Compre já, pague depois")
        );
    }

    #[tokio::test]
    async fn generate_submits_config_with_support_outputs() {
        let mut editor = editor();
        let generation = MockGenerationClient::new();

        let colors = editor.add_node(NodeKind::Colors, "Cores", Position::default());
        let generator = editor.add_node(NodeKind::ImageGenerator, "Gerador", Position::default());
        editor.connect(Connection::new(colors.clone(), generator.clone())).unwrap();

        editor
            .update_fields(
                &colors,
                serde_json::json!({"ambient_color": " #FFAA00 "})
                    .as_object()
                    .unwrap()
                    .clone(),
            )
            .unwrap();
        editor
            .update_fields(
                &generator,
                serde_json::json!({"dimensions": "9:16"})
                    .as_object()
                    .unwrap()
                    .clone(),
            )
            .unwrap();

        editor.generate(&generator, &generation).await.unwrap();

        let submitted = generation.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].ambient_color, "#FFAA00");
        assert_eq!(submitted[0].dimensions, "9:16");

        let node = editor.flow().find_node(&generator).unwrap();
        let fields: GeneratorFields = node.data.parse_fields().unwrap();
        assert_eq!(fields.assets.len(), 1);
        assert!(!fields.generating);
    }

    #[tokio::test]
    async fn two_reference_nodes_reach_the_generator_in_edge_order() {
        let mut editor = editor();
        let ref1 = editor.add_node(NodeKind::ReferenceImage, "Ref 1", Position::default());
        let ref2 = editor.add_node(NodeKind::ReferenceImage, "Ref 2", Position::default());
        let generator = editor.add_node(NodeKind::ImageGenerator, "Gerador", Position::default());

        editor
            .update_fields(
                &ref1,
                serde_json::json!({"urls": ["a.png"]}).as_object().unwrap().clone(),
            )
            .unwrap();
        editor
            .update_fields(
                &ref2,
                serde_json::json!({"urls": ["b.png"]}).as_object().unwrap().clone(),
            )
            .unwrap();
        editor.connect(Connection::new(ref1, generator.clone())).unwrap();
        editor.connect(Connection::new(ref2, generator.clone())).unwrap();

        let inputs = editor.resolved_inputs(&generator);
        assert!(inputs.contains_key("reference_image"));
        assert!(inputs.contains_key("reference_image_2"));

        let output = editor.refresh_output(&generator).unwrap().unwrap();
        assert_eq!(
            output.data["config"]["reference_images"],
            serde_json::json!(["a.png", "b.png"])
        );
    }

    #[tokio::test]
    async fn deleting_sole_source_empties_dependent_on_next_refresh() {
        let mut editor = editor();
        let records = seeded_records();
        let client = editor.add_node(NodeKind::Client, "Cliente", Position::default());
        let campaign = editor.add_node(NodeKind::Campaign, "Campanha", Position::default());
        editor.connect(Connection::new(client.clone(), campaign.clone())).unwrap();

        select_client(&mut editor, &client, &records, "c1").await;
        editor.select_item(&campaign, "m1", &records).await.unwrap();
        assert!(editor.flow().find_node(&campaign).unwrap().data.output.is_some());

        editor.remove_node(&client).unwrap();

        // Pull-based: nothing changed yet, the next recomputation does it.
        assert!(editor.resolved_inputs(&campaign).is_empty());
        let output = editor.refresh_output(&campaign).unwrap();
        assert!(output.is_none());
        assert!(editor.flow().find_node(&campaign).unwrap().data.output.is_none());
    }
}
