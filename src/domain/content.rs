//! Write-side content shapes and the rules they must satisfy before storage.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::types::{CareerKind, SkillCategory, SkillLevel};

pub const MAX_HERO_IMAGES: usize = 4;
pub const MAX_ABOUT_CARDS: usize = 4;
pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;
const AVATAR_BASE: &str = "https://api.dicebear.com/7.x/adventurer/svg";

#[derive(Debug, Clone, PartialEq)]
pub struct HeroContent {
    pub name: String,
    pub rank: String,
    pub title: String,
    pub subtitle: String,
    pub resume_link: String,
    pub contact_link: String,
    pub image_urls: Vec<String>,
    pub hobbies: Vec<String>,
}

impl HeroContent {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("hero.name", &self.name)?;
        require_text("hero.title", &self.title)?;
        if self.image_urls.len() > MAX_HERO_IMAGES {
            return Err(DomainError::validation(format!(
                "hero accepts at most {MAX_HERO_IMAGES} images, got {}",
                self.image_urls.len()
            )));
        }
        Ok(())
    }
}

/// Highlight card shown on the about page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutCard {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AboutContent {
    pub description: String,
    pub cards: Vec<AboutCard>,
    pub github_link: String,
    pub linkedin_link: String,
    pub available: bool,
}

impl AboutContent {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("about.description", &self.description)?;
        if self.cards.len() > MAX_ABOUT_CARDS {
            return Err(DomainError::validation(format!(
                "about accepts at most {MAX_ABOUT_CARDS} cards, got {}",
                self.cards.len()
            )));
        }
        for card in &self.cards {
            require_text("about.cards.title", &card.title)?;
        }
        Ok(())
    }
}

/// Heading copy for the testimonials page.
#[derive(Debug, Clone, PartialEq)]
pub struct TestimonyPageContent {
    pub title: String,
    pub description: String,
}

impl TestimonyPageContent {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("testimony_page.title", &self.title)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillDraft {
    pub name: String,
    pub description: String,
    pub specialities: Vec<String>,
    pub level: SkillLevel,
    pub category: SkillCategory,
    pub years_of_experience: i16,
}

impl SkillDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("skill.name", &self.name)?;
        if self.years_of_experience < 0 {
            return Err(DomainError::validation(format!(
                "years_of_experience must not be negative, got {}",
                self.years_of_experience
            )));
        }
        Ok(())
    }
}

/// One step of the education and work timeline.
///
/// Dates are free-form labels such as `2021` or `Present`.
#[derive(Debug, Clone, PartialEq)]
pub struct CareerDraft {
    pub title: String,
    pub description: String,
    pub affiliation: String,
    pub location: String,
    pub kind: CareerKind,
    pub started_at: String,
    pub ended_at: String,
}

impl CareerDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("career.title", &self.title)?;
        require_text("career.affiliation", &self.affiliation)?;
        require_text("career.started_at", &self.started_at)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub tech_stack: Vec<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
}

impl ProjectDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("project.title", &self.title)?;
        require_text("project.category", &self.category)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestimonialDraft {
    pub name: String,
    pub profile_url: String,
    pub affiliation: String,
    pub rating: i16,
    pub description: String,
}

impl TestimonialDraft {
    /// Build a draft, falling back to a generated avatar when no profile image is given.
    pub fn new(
        name: String,
        profile_url: Option<String>,
        affiliation: String,
        rating: i16,
        description: String,
    ) -> Self {
        let profile_url = profile_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| default_avatar(&name));
        Self {
            name,
            profile_url,
            affiliation,
            rating,
            description,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("testimonial.name", &self.name)?;
        require_text("testimonial.description", &self.description)?;
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(DomainError::validation(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}, got {}",
                self.rating
            )));
        }
        Ok(())
    }
}

/// Deterministic avatar URL seeded by the author's name.
pub fn default_avatar(name: &str) -> String {
    let seed: String = url::form_urlencoded::byte_serialize(name.trim().as_bytes()).collect();
    format!("{AVATAR_BASE}?seed={seed}")
}

fn require_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero(images: usize) -> HeroContent {
        HeroContent {
            name: "Ada".to_string(),
            rank: String::new(),
            title: "Engineer".to_string(),
            subtitle: String::new(),
            resume_link: String::new(),
            contact_link: String::new(),
            image_urls: (0..images).map(|i| format!("https://img/{i}")).collect(),
            hobbies: Vec::new(),
        }
    }

    #[test]
    fn hero_rejects_more_than_four_images() {
        assert!(hero(4).validate().is_ok());
        assert!(matches!(
            hero(5).validate(),
            Err(DomainError::Validation { .. })
        ));
    }

    #[test]
    fn rating_must_be_in_range() {
        for (rating, ok) in [(0, false), (1, true), (5, true), (6, false)] {
            let draft = TestimonialDraft::new(
                "Ada".to_string(),
                None,
                String::new(),
                rating,
                "great".to_string(),
            );
            assert_eq!(draft.validate().is_ok(), ok, "rating {rating}");
        }
    }

    #[test]
    fn missing_profile_url_uses_generated_avatar() {
        let draft = TestimonialDraft::new(
            "Ada Lovelace".to_string(),
            Some("  ".to_string()),
            String::new(),
            5,
            "great".to_string(),
        );
        assert_eq!(
            draft.profile_url,
            "https://api.dicebear.com/7.x/adventurer/svg?seed=Ada+Lovelace"
        );
    }

    #[test]
    fn about_accepts_up_to_four_cards() {
        let card = AboutCard {
            title: "Open source".to_string(),
            description: String::new(),
        };
        let mut about = AboutContent {
            description: "Hi".to_string(),
            cards: vec![card; MAX_ABOUT_CARDS],
            github_link: String::new(),
            linkedin_link: String::new(),
            available: true,
        };
        assert!(about.validate().is_ok());

        about.cards.push(about.cards[0].clone());
        assert!(about.validate().is_err());

        about.cards.truncate(1);
        about.cards[0].title = " ".to_string();
        assert!(about.validate().is_err());
    }

    #[test]
    fn skill_years_cannot_be_negative() {
        let mut draft = SkillDraft {
            name: "Rust".to_string(),
            description: String::new(),
            specialities: vec!["async".to_string()],
            level: SkillLevel::Advanced,
            category: SkillCategory::Backend,
            years_of_experience: 4,
        };
        assert!(draft.validate().is_ok());
        draft.years_of_experience = -1;
        assert!(draft.validate().is_err());
    }

    #[test]
    fn career_requires_title_affiliation_and_start() {
        let draft = CareerDraft {
            title: "Engineer".to_string(),
            description: String::new(),
            affiliation: "Acme".to_string(),
            location: String::new(),
            kind: CareerKind::Job,
            started_at: String::new(),
            ended_at: "Present".to_string(),
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn project_requires_title_and_category() {
        let draft = ProjectDraft {
            title: "Folio".to_string(),
            description: String::new(),
            category: " ".to_string(),
            tech_stack: Vec::new(),
            repo_url: None,
            live_url: None,
            image_url: None,
            featured: false,
        };
        assert!(draft.validate().is_err());
    }
}
