//! Post form with an author picker

use super::entity_dialog::{EntityDialog, ModalDialog, ReferenceList};
use crate::alerts::AlertService;
use crate::context::AppContext;
use crate::modal::ActiveModal;
use async_trait::async_trait;
use chrono::Utc;
use larder_model::{Post, User};
use std::ops::Deref;

/// Dialog for creating or editing a [`Post`]
pub struct PostDialog {
    form: EntityDialog<Post>,
    alerts: AlertService,
    pub users: ReferenceList<User>,
}

impl Deref for PostDialog {
    type Target = EntityDialog<Post>;

    fn deref(&self) -> &Self::Target {
        &self.form
    }
}

#[async_trait]
impl ModalDialog<Post> for PostDialog {
    /// New posts are dated now; existing ones keep their date
    fn build(mut entity: Post, modal: ActiveModal<Post>, ctx: &AppContext) -> Self {
        if entity.date.is_none() {
            entity.date = Some(Utc::now());
        }
        Self {
            form: EntityDialog::new(entity, modal, ctx),
            alerts: ctx.alerts.clone(),
            users: ReferenceList::new(ctx),
        }
    }

    async fn init(&self) {
        self.users.load(&self.alerts).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fakes;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_draft_gets_a_date() {
        let fakes = Fakes::new();
        let (modal, _modal_ref) = ActiveModal::open();
        let dialog = PostDialog::build(Post::new("Spring menu"), modal, &fakes.ctx);
        dialog.init().await;

        assert!(dialog.entity().date.is_some());
        assert_eq!(dialog.users.items().len(), 2);
    }

    #[test]
    fn test_existing_date_is_kept() {
        let fakes = Fakes::new();
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let (modal, _modal_ref) = ActiveModal::open();
        let dialog = PostDialog::build(Post::new("Old").with_date(date), modal, &fakes.ctx);

        assert_eq!(dialog.entity().date, Some(date));
    }
}
