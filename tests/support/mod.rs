//! In-memory doubles and request helpers shared by the integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use bytes::Bytes;
use http_body_util::BodyExt;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use folio::application::repos::{
    AboutRepo, CareersRepo, HealthRepo, HeroRepo, ProjectsRepo, RepoError, SkillsRepo,
    TestimonialScope, TestimonialsRepo, TestimonyPageRepo,
};
use folio::cache::{CacheError, CacheStore, ScanPage};
use folio::domain::content::{
    AboutContent, CareerDraft, HeroContent, ProjectDraft, SkillDraft, TestimonialDraft,
    TestimonyPageContent,
};
use folio::domain::entities::{
    AboutRecord, CareerRecord, HeroRecord, ProjectRecord, SkillRecord, TestimonialRecord,
    TestimonyPageRecord,
};
use folio::domain::types::{CareerKind, SkillCategory, SkillLevel};

pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Content repository held in memory, counting list reads per resource.
#[derive(Default)]
pub struct InMemoryContent {
    hero: Mutex<Option<HeroRecord>>,
    about: Mutex<Option<AboutRecord>>,
    skills: Mutex<BTreeMap<Uuid, SkillRecord>>,
    careers: Mutex<BTreeMap<Uuid, CareerRecord>>,
    projects: Mutex<BTreeMap<Uuid, ProjectRecord>>,
    testimonials: Mutex<BTreeMap<Uuid, TestimonialRecord>>,
    testimony_page: Mutex<Option<TestimonyPageRecord>>,
    hero_reads: AtomicUsize,
    skill_list_reads: AtomicUsize,
    career_list_reads: AtomicUsize,
    project_list_reads: AtomicUsize,
    testimonial_list_reads: AtomicUsize,
    testimony_page_reads: AtomicUsize,
}

impl InMemoryContent {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn hero_reads(&self) -> usize {
        self.hero_reads.load(Ordering::SeqCst)
    }

    pub fn skill_list_reads(&self) -> usize {
        self.skill_list_reads.load(Ordering::SeqCst)
    }

    pub fn career_list_reads(&self) -> usize {
        self.career_list_reads.load(Ordering::SeqCst)
    }

    pub fn testimony_page_reads(&self) -> usize {
        self.testimony_page_reads.load(Ordering::SeqCst)
    }

    pub fn project_list_reads(&self) -> usize {
        self.project_list_reads.load(Ordering::SeqCst)
    }

    pub fn testimonial_list_reads(&self) -> usize {
        self.testimonial_list_reads.load(Ordering::SeqCst)
    }

    pub async fn seed_project(&self, title: &str, category: &str) -> Uuid {
        let record = project_record(Uuid::new_v4(), project_draft(title, category));
        let id = record.id;
        self.projects.lock().await.insert(id, record);
        id
    }

    pub async fn seed_skill(&self, name: &str, category: SkillCategory) -> Uuid {
        let record = skill_record(Uuid::new_v4(), skill_draft(name, category));
        let id = record.id;
        self.skills.lock().await.insert(id, record);
        id
    }

    pub async fn seed_career(&self, title: &str, kind: CareerKind) -> Uuid {
        let record = career_record(Uuid::new_v4(), career_draft(title, kind));
        let id = record.id;
        self.careers.lock().await.insert(id, record);
        id
    }

    pub async fn seed_testimonial(&self, name: &str, approved: bool) -> Uuid {
        let id = Uuid::new_v4();
        let record = TestimonialRecord {
            id,
            name: name.to_string(),
            profile_url: format!("https://example.com/{name}.png"),
            affiliation: String::new(),
            rating: 5,
            description: "Excellent collaborator".to_string(),
            approved,
            created_at: OffsetDateTime::now_utc(),
        };
        self.testimonials.lock().await.insert(id, record);
        id
    }
}

pub fn project_draft(title: &str, category: &str) -> ProjectDraft {
    ProjectDraft {
        title: title.to_string(),
        description: String::new(),
        category: category.to_string(),
        tech_stack: vec!["rust".to_string()],
        repo_url: None,
        live_url: None,
        image_url: None,
        featured: false,
    }
}

pub fn skill_draft(name: &str, category: SkillCategory) -> SkillDraft {
    SkillDraft {
        name: name.to_string(),
        description: String::new(),
        specialities: vec!["apis".to_string()],
        level: SkillLevel::Intermediate,
        category,
        years_of_experience: 3,
    }
}

pub fn career_draft(title: &str, kind: CareerKind) -> CareerDraft {
    CareerDraft {
        title: title.to_string(),
        description: String::new(),
        affiliation: "Acme".to_string(),
        location: "Remote".to_string(),
        kind,
        started_at: "2020".to_string(),
        ended_at: "Present".to_string(),
    }
}

fn skill_record(id: Uuid, draft: SkillDraft) -> SkillRecord {
    let now = OffsetDateTime::now_utc();
    SkillRecord {
        id,
        name: draft.name,
        description: draft.description,
        specialities: draft.specialities,
        level: draft.level,
        category: draft.category,
        years_of_experience: draft.years_of_experience,
        created_at: now,
        updated_at: now,
    }
}

fn career_record(id: Uuid, draft: CareerDraft) -> CareerRecord {
    let now = OffsetDateTime::now_utc();
    CareerRecord {
        id,
        title: draft.title,
        description: draft.description,
        affiliation: draft.affiliation,
        location: draft.location,
        kind: draft.kind,
        started_at: draft.started_at,
        ended_at: draft.ended_at,
        created_at: now,
        updated_at: now,
    }
}

fn project_record(id: Uuid, draft: ProjectDraft) -> ProjectRecord {
    let now = OffsetDateTime::now_utc();
    ProjectRecord {
        id,
        title: draft.title,
        description: draft.description,
        category: draft.category,
        tech_stack: draft.tech_stack,
        repo_url: draft.repo_url,
        live_url: draft.live_url,
        image_url: draft.image_url,
        featured: draft.featured,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl HeroRepo for InMemoryContent {
    async fn load_hero(&self) -> Result<Option<HeroRecord>, RepoError> {
        self.hero_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.hero.lock().await.clone())
    }

    async fn save_hero(&self, content: HeroContent) -> Result<HeroRecord, RepoError> {
        let record = HeroRecord {
            name: content.name,
            rank: content.rank,
            title: content.title,
            subtitle: content.subtitle,
            resume_link: content.resume_link,
            contact_link: content.contact_link,
            image_urls: content.image_urls,
            hobbies: content.hobbies,
            updated_at: OffsetDateTime::now_utc(),
        };
        *self.hero.lock().await = Some(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl AboutRepo for InMemoryContent {
    async fn load_about(&self) -> Result<Option<AboutRecord>, RepoError> {
        Ok(self.about.lock().await.clone())
    }

    async fn save_about(&self, content: AboutContent) -> Result<AboutRecord, RepoError> {
        let record = AboutRecord {
            description: content.description,
            cards: content.cards,
            github_link: content.github_link,
            linkedin_link: content.linkedin_link,
            available: content.available,
            updated_at: OffsetDateTime::now_utc(),
        };
        *self.about.lock().await = Some(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl SkillsRepo for InMemoryContent {
    async fn list_skills(
        &self,
        category: Option<SkillCategory>,
    ) -> Result<Vec<SkillRecord>, RepoError> {
        self.skill_list_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .skills
            .lock()
            .await
            .values()
            .filter(|skill| category.is_none_or(|wanted| skill.category == wanted))
            .cloned()
            .collect())
    }

    async fn create_skill(&self, draft: SkillDraft) -> Result<SkillRecord, RepoError> {
        let record = skill_record(Uuid::new_v4(), draft);
        self.skills.lock().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_skill(&self, id: Uuid, draft: SkillDraft) -> Result<SkillRecord, RepoError> {
        let mut skills = self.skills.lock().await;
        let existing = skills.get_mut(&id).ok_or(RepoError::NotFound)?;
        let created_at = existing.created_at;
        *existing = SkillRecord {
            created_at,
            ..skill_record(id, draft)
        };
        Ok(existing.clone())
    }

    async fn delete_skill(&self, id: Uuid) -> Result<(), RepoError> {
        self.skills
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CareersRepo for InMemoryContent {
    async fn list_careers(&self) -> Result<Vec<CareerRecord>, RepoError> {
        self.career_list_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.careers.lock().await.values().cloned().collect())
    }

    async fn create_career(&self, draft: CareerDraft) -> Result<CareerRecord, RepoError> {
        let record = career_record(Uuid::new_v4(), draft);
        self.careers.lock().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_career(
        &self,
        id: Uuid,
        draft: CareerDraft,
    ) -> Result<CareerRecord, RepoError> {
        let mut careers = self.careers.lock().await;
        let existing = careers.get_mut(&id).ok_or(RepoError::NotFound)?;
        let created_at = existing.created_at;
        *existing = CareerRecord {
            created_at,
            ..career_record(id, draft)
        };
        Ok(existing.clone())
    }

    async fn delete_career(&self, id: Uuid) -> Result<(), RepoError> {
        self.careers
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl ProjectsRepo for InMemoryContent {
    async fn list_projects(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<ProjectRecord>, RepoError> {
        self.project_list_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .projects
            .lock()
            .await
            .values()
            .filter(|project| category.is_none_or(|wanted| project.category == wanted))
            .cloned()
            .collect())
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<ProjectRecord>, RepoError> {
        Ok(self.projects.lock().await.get(&id).cloned())
    }

    async fn create_project(&self, draft: ProjectDraft) -> Result<ProjectRecord, RepoError> {
        let record = project_record(Uuid::new_v4(), draft);
        self.projects.lock().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_project(
        &self,
        id: Uuid,
        draft: ProjectDraft,
    ) -> Result<ProjectRecord, RepoError> {
        let mut projects = self.projects.lock().await;
        let existing = projects.get_mut(&id).ok_or(RepoError::NotFound)?;
        let created_at = existing.created_at;
        *existing = ProjectRecord {
            created_at,
            ..project_record(id, draft)
        };
        Ok(existing.clone())
    }

    async fn delete_project(&self, id: Uuid) -> Result<(), RepoError> {
        self.projects
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl TestimonialsRepo for InMemoryContent {
    async fn list_testimonials(
        &self,
        scope: TestimonialScope,
    ) -> Result<Vec<TestimonialRecord>, RepoError> {
        self.testimonial_list_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .testimonials
            .lock()
            .await
            .values()
            .filter(|item| scope == TestimonialScope::All || item.approved)
            .cloned()
            .collect())
    }

    async fn create_testimonial(
        &self,
        draft: TestimonialDraft,
    ) -> Result<TestimonialRecord, RepoError> {
        let record = TestimonialRecord {
            id: Uuid::new_v4(),
            name: draft.name,
            profile_url: draft.profile_url,
            affiliation: draft.affiliation,
            rating: draft.rating,
            description: draft.description,
            approved: false,
            created_at: OffsetDateTime::now_utc(),
        };
        self.testimonials
            .lock()
            .await
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn set_approval(
        &self,
        id: Uuid,
        approved: bool,
    ) -> Result<TestimonialRecord, RepoError> {
        let mut testimonials = self.testimonials.lock().await;
        let record = testimonials.get_mut(&id).ok_or(RepoError::NotFound)?;
        record.approved = approved;
        Ok(record.clone())
    }

    async fn delete_testimonial(&self, id: Uuid) -> Result<(), RepoError> {
        self.testimonials
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl TestimonyPageRepo for InMemoryContent {
    async fn load_testimony_page(&self) -> Result<Option<TestimonyPageRecord>, RepoError> {
        self.testimony_page_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.testimony_page.lock().await.clone())
    }

    async fn save_testimony_page(
        &self,
        content: TestimonyPageContent,
    ) -> Result<TestimonyPageRecord, RepoError> {
        let record = TestimonyPageRecord {
            title: content.title,
            description: content.description,
            updated_at: OffsetDateTime::now_utc(),
        };
        *self.testimony_page.lock().await = Some(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl HealthRepo for InMemoryContent {
    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

/// Store whose every operation fails, as an unreachable Redis would.
#[derive(Default)]
pub struct UnavailableStore {
    calls: AtomicUsize,
}

impl UnavailableStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail(&self) -> CacheError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        CacheError::Timeout { op: "test" }
    }
}

#[async_trait]
impl CacheStore for UnavailableStore {
    async fn get(&self, _key: &str) -> Result<Option<Bytes>, CacheError> {
        Err(self.fail())
    }

    async fn set(&self, _key: &str, _value: Bytes, _ttl: Duration) -> Result<(), CacheError> {
        Err(self.fail())
    }

    async fn del(&self, _key: &str) -> Result<bool, CacheError> {
        Err(self.fail())
    }

    async fn scan(
        &self,
        _cursor: u64,
        _pattern: &str,
        _count: usize,
    ) -> Result<ScanPage, CacheError> {
        Err(self.fail())
    }
}

pub fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

pub fn admin_request(method: Method, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {ADMIN_TOKEN}"));
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build")
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    BodyExt::collect(response.into_body())
        .await
        .expect("body should collect")
        .to_bytes()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("body should be json")
}
