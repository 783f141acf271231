// Domain Layer - Entities, inputs and validation rules

pub mod error;
pub mod faq;
pub mod page;
pub mod post;
pub mod settings;
pub mod tenant;
pub mod user;
pub mod validate;

// Re-exports
pub use error::{DomainError, FieldError, ValidationErrors};
pub use faq::{Faq, FaqId, FaqInput, MAX_FAQ_ORDER};
pub use page::{Page, PageId, PageInput, PublishStatus};
pub use post::{Post, PostFilter, PostId, PostInput, PostRecord};
pub use settings::{DomainSettings, DomainSettingsInput, SeoSettings, SeoSettingsInput};
pub use tenant::{Domain, DomainId, DomainInput};
pub use user::{
    NewUser, Role, Session, SessionId, User, UserCredentials, UserId, UserRecord,
};
