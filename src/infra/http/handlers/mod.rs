//! JSON handlers for the content API.

mod about;
mod careers;
mod health;
mod hero;
mod projects;
mod skills;
mod testimonials;

pub use about::{get_about, update_about};
pub use careers::{create_career, delete_career, list_careers, update_career};
pub use health::health;
pub use hero::{get_hero, update_hero};
pub use projects::{create_project, delete_project, get_project, list_projects, update_project};
pub use skills::{create_skill, delete_skill, list_skills, update_skill};
pub use testimonials::{
    delete_testimonial, get_testimony_page, list_all_testimonials, list_testimonials,
    set_approval, submit_testimonial, update_testimony_page,
};

use folio_api_types::{
    AboutCardDto, AboutDto, CareerDto, CareerWriteRequest, HeroDto, ProjectDto,
    ProjectWriteRequest, SkillDto, SkillWriteRequest, TestimonialDto, TestimonyPageDto,
};

use crate::domain::content::{AboutCard, CareerDraft, ProjectDraft, SkillDraft};
use crate::domain::entities::{
    AboutRecord, CareerRecord, HeroRecord, ProjectRecord, SkillRecord, TestimonialRecord,
    TestimonyPageRecord,
};
use crate::domain::error::DomainError;
use crate::domain::types::{CareerKind, SkillCategory, SkillLevel};

fn hero_to_dto(record: HeroRecord) -> HeroDto {
    HeroDto {
        name: record.name,
        rank: record.rank,
        title: record.title,
        subtitle: record.subtitle,
        resume_link: record.resume_link,
        contact_link: record.contact_link,
        image_urls: record.image_urls,
        hobbies: record.hobbies,
        updated_at: record.updated_at,
    }
}

fn about_to_dto(record: AboutRecord) -> AboutDto {
    AboutDto {
        description: record.description,
        cards: record
            .cards
            .into_iter()
            .map(|card| AboutCardDto {
                title: card.title,
                description: card.description,
            })
            .collect(),
        github_link: record.github_link,
        linkedin_link: record.linkedin_link,
        available: record.available,
        updated_at: record.updated_at,
    }
}

fn about_cards(cards: Vec<AboutCardDto>) -> Vec<AboutCard> {
    cards
        .into_iter()
        .map(|card| AboutCard {
            title: card.title,
            description: card.description,
        })
        .collect()
}

fn skill_to_dto(record: SkillRecord) -> SkillDto {
    SkillDto {
        id: record.id,
        name: record.name,
        description: record.description,
        specialities: record.specialities,
        level: record.level.as_str().to_string(),
        category: record.category.as_str().to_string(),
        years_of_experience: record.years_of_experience,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

fn skill_draft(request: SkillWriteRequest) -> Result<SkillDraft, DomainError> {
    Ok(SkillDraft {
        level: SkillLevel::parse(&request.level)?,
        category: SkillCategory::parse(&request.category)?,
        name: request.name,
        description: request.description,
        specialities: request.specialities,
        years_of_experience: request.years_of_experience,
    })
}

fn career_to_dto(record: CareerRecord) -> CareerDto {
    CareerDto {
        id: record.id,
        title: record.title,
        description: record.description,
        affiliation: record.affiliation,
        location: record.location,
        kind: record.kind.as_str().to_string(),
        started_at: record.started_at,
        ended_at: record.ended_at,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

fn career_draft(request: CareerWriteRequest) -> Result<CareerDraft, DomainError> {
    Ok(CareerDraft {
        kind: CareerKind::parse(&request.kind)?,
        title: request.title,
        description: request.description,
        affiliation: request.affiliation,
        location: request.location,
        started_at: request.started_at,
        ended_at: request.ended_at,
    })
}

fn project_to_dto(record: ProjectRecord) -> ProjectDto {
    ProjectDto {
        id: record.id,
        title: record.title,
        description: record.description,
        category: record.category,
        tech_stack: record.tech_stack,
        repo_url: record.repo_url,
        live_url: record.live_url,
        image_url: record.image_url,
        featured: record.featured,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

fn project_draft(request: ProjectWriteRequest) -> ProjectDraft {
    ProjectDraft {
        title: request.title,
        description: request.description,
        category: request.category,
        tech_stack: request.tech_stack,
        repo_url: request.repo_url,
        live_url: request.live_url,
        image_url: request.image_url,
        featured: request.featured,
    }
}

fn testimonial_to_dto(record: TestimonialRecord) -> TestimonialDto {
    TestimonialDto {
        id: record.id,
        name: record.name,
        profile_url: record.profile_url,
        affiliation: record.affiliation,
        rating: record.rating,
        description: record.description,
        approved: record.approved,
        created_at: record.created_at,
    }
}

fn testimony_page_to_dto(record: TestimonyPageRecord) -> TestimonyPageDto {
    TestimonyPageDto {
        title: record.title,
        description: record.description,
        updated_at: record.updated_at,
    }
}
