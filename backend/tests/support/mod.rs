//! Shared fixtures for endpoint-level tests.
//!
//! Provides in-memory repository adapters honouring the port contracts
//! (including the atomic check-then-insert of the signature port) and a
//! session middleware configured for plain-HTTP test requests.

use std::sync::{Arc, Mutex};

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use async_trait::async_trait;
use chrono::Utc;

use petition_backend::domain::ports::{
    CampaignPersistenceError, CampaignRepository, FixtureViewRenderer, SignatureOutcome,
    SignaturePersistenceError, SignatureRepository,
};
use petition_backend::domain::{
    Campaign, CampaignId, CampaignWorkflow, Goal, NewCampaign, NewSignature, Signature,
    SignatureId, SignerName, Statement, Title, UserId,
};
use petition_backend::inbound::http::state::HttpState;
use petition_backend::outbound::markdown::ComrakMarkdownRenderer;

/// Build a session middleware configured for tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// In-memory campaign store.
#[derive(Default)]
pub struct InMemoryCampaigns {
    rows: Mutex<Vec<Campaign>>,
}

impl InMemoryCampaigns {
    pub fn stored(&self) -> Vec<Campaign> {
        self.rows.lock().expect("rows lock").clone()
    }

    pub fn seed(&self, campaign: Campaign) {
        self.rows.lock().expect("rows lock").push(campaign);
    }
}

#[async_trait]
impl CampaignRepository for InMemoryCampaigns {
    async fn insert(
        &self,
        campaign: &NewCampaign,
    ) -> Result<CampaignId, CampaignPersistenceError> {
        let mut rows = self.rows.lock().expect("rows lock");
        let next = rows.iter().map(|c| c.id.get()).max().unwrap_or(0) + 1;
        let id = CampaignId::new(next)
            .map_err(|err| CampaignPersistenceError::query(err.to_string()))?;
        rows.push(Campaign {
            id,
            title: campaign.title.clone(),
            statement: campaign.statement.clone(),
            goal: campaign.goal,
            create_user_id: campaign.create_user_id,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn find_by_id(
        &self,
        id: CampaignId,
    ) -> Result<Option<Campaign>, CampaignPersistenceError> {
        let rows = self.rows.lock().expect("rows lock");
        Ok(rows.iter().find(|c| c.id == id).cloned())
    }

    async fn list_by_creator(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Campaign>, CampaignPersistenceError> {
        let rows = self.rows.lock().expect("rows lock");
        let mut mine: Vec<Campaign> = rows
            .iter()
            .filter(|c| c.create_user_id == user_id)
            .cloned()
            .collect();
        mine.reverse();
        Ok(mine)
    }
}

/// In-memory signature store; the mutex makes check-then-insert atomic,
/// matching the transactional contract of the port.
#[derive(Default)]
pub struct InMemorySignatures {
    rows: Mutex<Vec<Signature>>,
}

impl InMemorySignatures {
    pub fn stored(&self) -> Vec<Signature> {
        self.rows.lock().expect("rows lock").clone()
    }

    pub fn seed(&self, signature: Signature) {
        self.rows.lock().expect("rows lock").push(signature);
    }
}

#[async_trait]
impl SignatureRepository for InMemorySignatures {
    async fn count_for_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<i64, SignaturePersistenceError> {
        let rows = self.rows.lock().expect("rows lock");
        Ok(rows.iter().filter(|s| s.campaign_id == campaign_id).count() as i64)
    }

    async fn record(
        &self,
        signature: &NewSignature,
    ) -> Result<SignatureOutcome, SignaturePersistenceError> {
        let mut rows = self.rows.lock().expect("rows lock");
        let exists = rows
            .iter()
            .any(|s| s.campaign_id == signature.campaign_id && s.name == signature.name);
        if exists {
            return Ok(SignatureOutcome::AlreadySigned);
        }
        let id = SignatureId::new(rows.len() as i64 + 1)
            .map_err(|err| SignaturePersistenceError::query(err.to_string()))?;
        rows.push(Signature {
            id,
            campaign_id: signature.campaign_id,
            name: signature.name.clone(),
            comment: signature.comment.clone(),
            created_at: Utc::now(),
        });
        Ok(SignatureOutcome::Recorded(id))
    }
}

/// Repository handles plus the HTTP state wired over them.
pub struct TestBackend {
    pub campaigns: Arc<InMemoryCampaigns>,
    pub signatures: Arc<InMemorySignatures>,
    pub state: HttpState,
}

/// Wire an [`HttpState`] over fresh in-memory adapters, the real Markdown
/// renderer, and the fixture view renderer.
pub fn test_backend() -> TestBackend {
    let campaigns = Arc::new(InMemoryCampaigns::default());
    let signatures = Arc::new(InMemorySignatures::default());
    let workflow = CampaignWorkflow::new(
        campaigns.clone(),
        signatures.clone(),
        Arc::new(ComrakMarkdownRenderer),
        Arc::new(FixtureViewRenderer),
    );
    TestBackend {
        campaigns,
        signatures,
        state: HttpState::new(workflow),
    }
}

pub fn campaign(id: i64, creator: i64) -> Campaign {
    Campaign {
        id: CampaignId::new(id).expect("valid campaign id"),
        title: Title::new("Save the library").expect("valid title"),
        statement: Statement::new("<p>Why it matters</p>").expect("valid statement"),
        goal: Goal::new(100).expect("valid goal"),
        create_user_id: UserId::new(creator).expect("valid user id"),
        created_at: Utc::now(),
    }
}

pub fn signature(id: i64, campaign: i64, name: &str) -> Signature {
    Signature {
        id: SignatureId::new(id).expect("valid signature id"),
        campaign_id: CampaignId::new(campaign).expect("valid campaign id"),
        name: SignerName::new(name).expect("valid name"),
        comment: None,
        created_at: Utc::now(),
    }
}
