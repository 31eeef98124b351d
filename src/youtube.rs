use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use reqwest::header::ACCEPT_LANGUAGE;
use scraper::{Html, Selector};
use serde::Deserialize;
use url::Url;

use crate::loader::{ContentLoader, Document, LoaderError};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

static VIDEO_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("Failed to compile video id regex"));

static PLAYER_RESPONSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"ytInitialPlayerResponse\s*=\s*").expect("Failed to compile player response regex")
});

static TEXT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("text").expect("Failed to parse text selector")
});

/// Loads the transcript of a YouTube video, with the video's details as
/// document metadata.
#[derive(Clone)]
pub struct YoutubeLoader {
    client: Client,
    languages: Vec<String>,
}

impl YoutubeLoader {
    pub fn new(client: Client, languages: Vec<String>) -> Self {
        Self { client, languages }
    }

    async fn get_text(&self, url: &str) -> Result<String, LoaderError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

impl ContentLoader for YoutubeLoader {
    type Error = LoaderError;

    async fn load(&self, url: &Url) -> Result<Vec<Document>, LoaderError> {
        let video_id =
            extract_video_id(url).ok_or_else(|| LoaderError::InvalidVideoUrl(url.to_string()))?;

        let watch_page = self.get_text(&format!("{WATCH_URL}{video_id}")).await?;
        let player = parse_player_response(&watch_page)
            .ok_or_else(|| LoaderError::PlayerResponse(video_id.clone()))?;

        let Some(track) = choose_track(&player, &video_id, &self.languages)? else {
            tracing::info!(%video_id, "transcripts are disabled for video");
            return Ok(Vec::new());
        };
        tracing::debug!(%video_id, language = %track.language_code, "fetching transcript");

        let transcript_url = track.base_url.replace("&fmt=srv3", "");
        let xml = self.get_text(&transcript_url).await?;
        let transcript = parse_transcript(&xml);

        if transcript.is_empty() {
            return Ok(Vec::new());
        }

        Ok(vec![player.into_document(video_id, transcript)])
    }
}

/// Decides which caption track to fetch. `Ok(None)` means the video has
/// transcripts disabled.
pub fn choose_track<'a>(
    player: &'a PlayerResponse,
    video_id: &str,
    languages: &[String],
) -> Result<Option<&'a CaptionTrack>, LoaderError> {
    if let Some(reason) = player.unplayable_reason() {
        return Err(LoaderError::VideoUnavailable {
            video_id: video_id.to_string(),
            reason,
        });
    }

    let tracks = player.caption_tracks();
    if tracks.is_empty() {
        return Ok(None);
    }

    select_track(tracks, languages)
        .map(Some)
        .ok_or_else(|| LoaderError::NoTranscript {
            video_id: video_id.to_string(),
            available: tracks
                .iter()
                .map(|t| t.language_code.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Finds the 11 character video id in the usual YouTube URL shapes.
pub fn extract_video_id(url: &Url) -> Option<String> {
    let host = url.host_str()?.trim_start_matches("www.");
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let candidate = match host {
        "youtu.be" => segments.next().map(str::to_string),
        "youtube.com" | "m.youtube.com" | "music.youtube.com" | "youtube-nocookie.com" => {
            match segments.next()? {
                "watch" => url
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned()),
                "shorts" | "embed" | "live" | "v" => segments.next().map(str::to_string),
                _ => None,
            }
        }
        _ => None,
    }?;

    VIDEO_ID_RE.is_match(&candidate).then_some(candidate)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    #[serde(default)]
    playability_status: Option<PlayabilityStatus>,
    #[serde(default)]
    captions: Option<Captions>,
    #[serde(default)]
    video_details: Option<VideoDetails>,
    #[serde(default)]
    microformat: Option<Microformat>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    status: String,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: TracklistRenderer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    /// "asr" for auto-generated tracks.
    #[serde(default)]
    pub kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoDetails {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    short_description: Option<String>,
    #[serde(default)]
    view_count: Option<String>,
    #[serde(default)]
    length_seconds: Option<String>,
    #[serde(default)]
    thumbnail: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    #[serde(default)]
    thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Microformat {
    player_microformat_renderer: MicroformatRenderer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MicroformatRenderer {
    #[serde(default)]
    publish_date: Option<String>,
}

impl PlayerResponse {
    fn unplayable_reason(&self) -> Option<String> {
        let status = self.playability_status.as_ref()?;
        (status.status != "OK").then(|| {
            status
                .reason
                .clone()
                .unwrap_or_else(|| status.status.clone())
        })
    }

    pub fn caption_tracks(&self) -> &[CaptionTrack] {
        self.captions
            .as_ref()
            .map(|c| c.player_captions_tracklist_renderer.caption_tracks.as_slice())
            .unwrap_or_default()
    }

    fn into_document(self, video_id: String, transcript: String) -> Document {
        let mut doc = Document::new(transcript).with_metadata("source", video_id);

        if let Some(details) = self.video_details {
            let fields = [
                ("title", details.title),
                ("author", details.author),
                ("description", details.short_description),
                ("view_count", details.view_count),
                ("length", details.length_seconds),
                (
                    "thumbnail_url",
                    details
                        .thumbnail
                        .and_then(|t| t.thumbnails.into_iter().last())
                        .map(|t| t.url),
                ),
            ];
            for (key, value) in fields {
                if let Some(value) = value {
                    doc = doc.with_metadata(key, value);
                }
            }
        }

        if let Some(date) = self
            .microformat
            .and_then(|m| m.player_microformat_renderer.publish_date)
        {
            doc = doc.with_metadata("publish_date", date);
        }

        doc
    }
}

/// Reads the player response JSON embedded in a watch page.
pub fn parse_player_response(html: &str) -> Option<PlayerResponse> {
    let start = PLAYER_RESPONSE_RE
        .find_iter(html)
        .map(|m| m.end())
        .find(|&end| html[end..].starts_with('{'))?;

    // The object is followed by more script; only the first JSON value is read.
    let mut stream =
        serde_json::Deserializer::from_str(&html[start..]).into_iter::<PlayerResponse>();
    match stream.next()? {
        Ok(player) => Some(player),
        Err(e) => {
            tracing::warn!(error = %e, "malformed player response");
            None
        }
    }
}

/// Picks a track for the first preferred language that has one, manual
/// tracks before auto-generated ones.
pub fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    languages: &[String],
) -> Option<&'a CaptionTrack> {
    languages.iter().find_map(|lang| {
        let matching = || tracks.iter().filter(move |t| t.language_code == *lang);
        matching()
            .find(|t| !t.is_generated())
            .or_else(|| matching().next())
    })
}

/// Joins the snippets of a timed-text transcript into plain text.
pub fn parse_transcript(xml: &str) -> String {
    let fragment = Html::parse_fragment(xml);

    fragment
        .select(&TEXT_SELECTOR)
        .map(|el| {
            // Snippet text is escaped twice; the parser undoes the first layer.
            let once = el.text().collect::<String>();
            let twice = Html::parse_fragment(&once);
            twice.root_element().text().collect::<String>()
        })
        .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
