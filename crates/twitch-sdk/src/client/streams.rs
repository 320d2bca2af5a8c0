use super::*;
use crate::models::{Marker, StreamMarkersPayload, Stream, StreamPayload, flatten_markers};

impl TwitchClient {
    /// Live streams for the given broadcasters (by user id or login).
    ///
    /// Offline broadcasters are absent from the result.
    pub async fn get_streams<I, R>(&self, broadcasters: I) -> Result<Vec<Stream>, TwitchError>
    where
        I: IntoIterator<Item = R>,
        R: Into<Reference>,
    {
        let data: Vec<StreamPayload> = self
            .lookup("/streams", QueryKeys::STREAMS, broadcasters)
            .await?;
        Ok(data.into_iter().map(Stream::from).collect())
    }

    pub async fn get_stream(
        &self,
        broadcaster: impl Into<Reference>,
    ) -> Result<Option<Stream>, TwitchError> {
        Ok(self.get_streams([broadcaster.into()]).await?.into_iter().next())
    }

    /// Markers of `user`'s most recent VOD, flattened.
    pub async fn get_stream_markers(
        &self,
        user: impl Into<Reference>,
    ) -> Result<Vec<Marker>, TwitchError> {
        self.require_scope(Scope::UserReadBroadcast)?;
        let user_id = id_param(user, "user")?;
        let data: Vec<StreamMarkersPayload> = self
            .get_data(&format!("/streams/markers?user_id={user_id}"))
            .await?;
        Ok(flatten_markers(data))
    }
}
