use super::ReviewError;
use crate::model::{validate_review_rating, Review, ReviewCreate, ReviewId, ReviewUpdate};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Review {
    type Id = ReviewId;
    type Create = ReviewCreate;
    type Update = ReviewUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = ReviewError;

    fn from_create_params(id: ReviewId, params: ReviewCreate) -> Result<Self, Self::Error> {
        let rating = validate_review_rating(params.rating).map_err(ReviewError::ValidationError)?;

        Ok(Self {
            id,
            client_id: params.client_id,
            restaurant_id: params.restaurant_id,
            order_id: params.order_id,
            rating,
            comment: params.comment,
            review_date: Utc::now(),
        })
    }

    async fn on_update(&mut self, update: ReviewUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(rating) = update.rating {
            self.rating = validate_review_rating(rating).map_err(ReviewError::ValidationError)?;
        }
        if let Some(comment) = update.comment {
            self.comment = comment;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
