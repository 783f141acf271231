// Table rows for list output

use domainhub_sdk::{Domain, Page, Post, User};
use tabled::Tabled;

fn or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

#[derive(Tabled)]
pub struct DomainRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Contact")]
    pub contact: String,
    #[tabled(rename = "Updated")]
    pub updated: String,
}

impl From<Domain> for DomainRow {
    fn from(d: Domain) -> Self {
        Self {
            id: d.id,
            contact: or_dash(&d.contact_email),
            name: d.name,
            title: d.title,
            updated: d.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct PageRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "FAQ")]
    pub show_faq: String,
}

impl From<Page> for PageRow {
    fn from(p: Page) -> Self {
        Self {
            id: p.id,
            status: p.status.to_string(),
            show_faq: if p.show_faq { "yes" } else { "no" }.to_string(),
            name: p.name,
            title: p.title,
        }
    }
}

#[derive(Tabled)]
pub struct PostRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Domain")]
    pub domain_id: i64,
    #[tabled(rename = "Slug")]
    pub slug: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Published")]
    pub published: String,
}

impl From<Post> for PostRow {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            domain_id: p.domain_id,
            status: p.status.to_string(),
            published: p
                .published_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
            slug: p.slug,
            title: p.title,
        }
    }
}

#[derive(Tabled)]
pub struct UserRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Email")]
    pub email: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Role")]
    pub role: String,
    #[tabled(rename = "Created")]
    pub created: String,
}

impl From<User> for UserRow {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: or_dash(&u.name),
            role: u.role.to_string(),
            created: u.created_at.format("%Y-%m-%d").to_string(),
            email: u.email,
        }
    }
}
