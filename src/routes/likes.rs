use crate::routes::imports::*;

pub async fn toggle_like(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut session: WritableSession,
) -> ApiResult<Json<LikeState>> {
    let visitor = visitor_id(&mut session);
    let like_state = state.likes.toggle(&id, &visitor).await?;
    Ok(Json(like_state))
}
