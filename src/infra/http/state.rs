use std::sync::Arc;

use crate::application::about::AboutService;
use crate::application::careers::CareerService;
use crate::application::hero::HeroService;
use crate::application::projects::ProjectService;
use crate::application::repos::{
    AboutRepo, CareersRepo, HealthRepo, HeroRepo, ProjectsRepo, SkillsRepo, TestimonialsRepo,
    TestimonyPageRepo,
};
use crate::application::skills::SkillService;
use crate::application::testimonials::TestimonialService;
use crate::application::testimony_page::TestimonyPageService;

/// Services shared by every handler.
#[derive(Clone)]
pub struct HttpState {
    pub hero: HeroService,
    pub about: AboutService,
    pub skills: SkillService,
    pub careers: CareerService,
    pub projects: ProjectService,
    pub testimonials: TestimonialService,
    pub testimony_page: TestimonyPageService,
    pub health: Arc<dyn HealthRepo>,
}

impl HttpState {
    /// Wire services over a single repository value implementing every content trait.
    pub fn from_repositories<R>(repos: Arc<R>) -> Self
    where
        R: HeroRepo
            + AboutRepo
            + SkillsRepo
            + CareersRepo
            + ProjectsRepo
            + TestimonialsRepo
            + TestimonyPageRepo
            + HealthRepo
            + 'static,
    {
        Self {
            hero: HeroService::new(repos.clone()),
            about: AboutService::new(repos.clone()),
            skills: SkillService::new(repos.clone()),
            careers: CareerService::new(repos.clone()),
            projects: ProjectService::new(repos.clone()),
            testimonials: TestimonialService::new(repos.clone()),
            testimony_page: TestimonyPageService::new(repos.clone()),
            health: repos,
        }
    }
}
