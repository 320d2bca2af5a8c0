use super::*;
use crate::models::{Clip, ClipPayload, Video, VideoPayload};

impl TwitchClient {
    pub async fn get_videos<I, R>(&self, videos: I) -> Result<Vec<Video>, TwitchError>
    where
        I: IntoIterator<Item = R>,
        R: Into<Reference>,
    {
        let data: Vec<VideoPayload> = self.lookup("/videos", QueryKeys::VIDEOS, videos).await?;
        data.into_iter().map(Video::try_from).collect()
    }

    pub async fn get_video(
        &self,
        video: impl Into<Reference>,
    ) -> Result<Option<Video>, TwitchError> {
        Ok(self.get_videos([video.into()]).await?.into_iter().next())
    }

    /// Look up clips by slug.
    pub async fn get_clips<I, R>(&self, clips: I) -> Result<Vec<Clip>, TwitchError>
    where
        I: IntoIterator<Item = R>,
        R: Into<Reference>,
    {
        let data: Vec<ClipPayload> = self.lookup("/clips", QueryKeys::CLIPS, clips).await?;
        Ok(data.into_iter().map(Clip::from).collect())
    }

    pub async fn get_clip(&self, clip: impl Into<Reference>) -> Result<Option<Clip>, TwitchError> {
        Ok(self.get_clips([clip.into()]).await?.into_iter().next())
    }
}
