//! Streaming walk over an MPD document collecting audio representations.

use crate::error::{FetchError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

/// One `Representation` inside an audio `AdaptationSet`, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioRepresentation {
    pub bandwidth: u64,
    /// `BaseURL` text as written (usually relative).
    pub base_url: String,
}

/// Namespace the root element lives in. Child elements count only when they
/// resolve to the same namespace, whatever prefix they use.
#[derive(Debug)]
struct DocNamespace {
    /// `None` when the root is not in any namespace.
    uri: Option<Vec<u8>>,
}

impl DocNamespace {
    fn from_root(resolved: &ResolveResult<'_>) -> Self {
        let uri = match resolved {
            ResolveResult::Bound(ns) => Some(ns.0.to_vec()),
            _ => None,
        };
        Self { uri }
    }

    fn contains(&self, resolved: &ResolveResult<'_>) -> bool {
        match (resolved, self.uri.as_deref()) {
            (ResolveResult::Bound(ns), Some(uri)) => ns.0 == uri,
            (ResolveResult::Unbound, None) => true,
            _ => false,
        }
    }
}

fn attr_value(e: &BytesStart<'_>, local: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| FetchError::shape(format!("MPD attribute: {}", err)))?;
        if attr.key.local_name().as_ref() == local {
            return Ok(Some(String::from_utf8_lossy(&attr.value).into_owned()));
        }
    }
    Ok(None)
}

fn is_audio_set(e: &BytesStart<'_>) -> Result<bool> {
    if let Some(ct) = attr_value(e, b"contentType")? {
        return Ok(ct.contains("audio"));
    }
    Ok(attr_value(e, b"mimeType")?.is_some_and(|m| m.starts_with("audio/")))
}

#[derive(Default)]
struct PendingRep {
    bandwidth: u64,
    base_url: Option<String>,
}

/// Collects every representation of every audio adaptation set.
pub fn audio_representations(manifest: &[u8]) -> Result<Vec<AudioRepresentation>> {
    let mut reader = NsReader::from_reader(manifest);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut ns: Option<DocNamespace> = None;
    let mut in_audio_set = false;
    let mut rep: Option<PendingRep> = None;
    let mut in_base_url = false;
    let mut out = Vec::new();

    loop {
        match reader.read_resolved_event_into(&mut buf)? {
            (resolved, Event::Start(e)) => {
                if ns.is_none() {
                    let root = DocNamespace::from_root(&resolved);
                    tracing::trace!(
                        uri = ?root.uri.as_deref().map(String::from_utf8_lossy),
                        "MPD namespace"
                    );
                    ns = Some(root);
                } else if ns.as_ref().is_some_and(|doc| doc.contains(&resolved)) {
                    match e.local_name().as_ref() {
                        b"AdaptationSet" => in_audio_set = is_audio_set(&e)?,
                        b"Representation" if in_audio_set => {
                            let bandwidth = attr_value(&e, b"bandwidth")?
                                .and_then(|b| b.trim().parse().ok())
                                .unwrap_or(0);
                            rep = Some(PendingRep {
                                bandwidth,
                                base_url: None,
                            });
                        }
                        b"BaseURL" if rep.is_some() => in_base_url = true,
                        _ => {}
                    }
                }
            }
            (_, Event::Text(t)) if in_base_url => {
                let raw = String::from_utf8_lossy(&t).into_owned();
                let text = quick_xml::escape::unescape(&raw)
                    .map_err(|e| FetchError::shape(format!("BaseURL: {}", e)))?;
                if let Some(r) = rep.as_mut() {
                    r.base_url
                        .get_or_insert_with(String::new)
                        .push_str(text.trim());
                }
            }
            (resolved, Event::End(e)) => {
                if ns.as_ref().is_some_and(|doc| doc.contains(&resolved)) {
                    match e.local_name().as_ref() {
                        b"AdaptationSet" => in_audio_set = false,
                        b"BaseURL" => in_base_url = false,
                        b"Representation" => {
                            if let Some(PendingRep {
                                bandwidth,
                                base_url: Some(base_url),
                            }) = rep.take()
                            {
                                out.push(AudioRepresentation { bandwidth, base_url });
                            }
                        }
                        _ => {}
                    }
                }
            }
            (_, Event::Eof) => break,
            _ => {}
        }
        buf.clear();
    }

    if ns.is_none() {
        return Err(FetchError::shape("MPD has no root element"));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_namespace_discovered_from_root() {
        let doc = br#"<?xml version="1.0"?>
<mpd:MPD xmlns:mpd="urn:mpeg:DASH:schema:MPD:2011">
  <mpd:Period>
    <mpd:AdaptationSet contentType="audio">
      <mpd:Representation bandwidth="96000"><mpd:BaseURL>DASH_AUDIO_96.mp4</mpd:BaseURL></mpd:Representation>
    </mpd:AdaptationSet>
  </mpd:Period>
</mpd:MPD>"#;
        let reps = audio_representations(doc).unwrap();
        assert_eq!(
            reps,
            vec![AudioRepresentation {
                bandwidth: 96000,
                base_url: "DASH_AUDIO_96.mp4".into()
            }]
        );
    }

    #[test]
    fn foreign_namespace_elements_ignored() {
        let doc = br#"<MPD xmlns="urn:mpeg:dash:schema:mpd:2011" xmlns:x="urn:other">
  <Period>
    <x:AdaptationSet contentType="audio">
      <x:Representation bandwidth="999999"><x:BaseURL>bogus.mp4</x:BaseURL></x:Representation>
    </x:AdaptationSet>
    <AdaptationSet contentType="audio">
      <Representation bandwidth="64000"><BaseURL>real.mp4</BaseURL></Representation>
    </AdaptationSet>
  </Period>
</MPD>"#;
        let reps = audio_representations(doc).unwrap();
        assert_eq!(reps.len(), 1);
        assert_eq!(reps[0].base_url, "real.mp4");
    }

    #[test]
    fn redeclared_default_namespace_is_foreign() {
        let doc = br#"<MPD xmlns="urn:mpeg:dash:schema:mpd:2011">
  <Period>
    <AdaptationSet xmlns="urn:other" contentType="audio">
      <Representation bandwidth="999999"><BaseURL>bogus.mp4</BaseURL></Representation>
    </AdaptationSet>
    <AdaptationSet contentType="audio">
      <Representation bandwidth="64000"><BaseURL>real.mp4</BaseURL></Representation>
    </AdaptationSet>
  </Period>
</MPD>"#;
        let reps = audio_representations(doc).unwrap();
        assert_eq!(
            reps,
            vec![AudioRepresentation {
                bandwidth: 64000,
                base_url: "real.mp4".into()
            }]
        );
    }

    #[test]
    fn namespace_matched_by_uri_not_prefix() {
        let doc = br#"<mpd:MPD xmlns:mpd="urn:mpeg:dash:schema:mpd:2011" xmlns="urn:mpeg:dash:schema:mpd:2011">
  <Period>
    <AdaptationSet contentType="audio">
      <Representation bandwidth="128000"><BaseURL>DASH_AUDIO_128.mp4</BaseURL></Representation>
    </AdaptationSet>
    <mpd:AdaptationSet contentType="audio">
      <mpd:Representation bandwidth="64000"><mpd:BaseURL>DASH_AUDIO_64.mp4</mpd:BaseURL></mpd:Representation>
    </mpd:AdaptationSet>
  </Period>
</mpd:MPD>"#;
        let reps = audio_representations(doc).unwrap();
        let urls: Vec<&str> = reps.iter().map(|r| r.base_url.as_str()).collect();
        assert_eq!(urls, vec!["DASH_AUDIO_128.mp4", "DASH_AUDIO_64.mp4"]);
    }

    #[test]
    fn document_without_namespace_uses_unqualified_elements() {
        let doc = br#"<MPD><Period><AdaptationSet contentType="audio">
  <Representation bandwidth="32000"><BaseURL>a.mp4</BaseURL></Representation>
</AdaptationSet></Period></MPD>"#;
        let reps = audio_representations(doc).unwrap();
        assert_eq!(reps.len(), 1);
    }

    #[test]
    fn mime_type_marks_audio_when_content_type_missing() {
        let doc = br#"<MPD xmlns="urn:mpeg:dash:schema:mpd:2011"><Period>
  <AdaptationSet mimeType="audio/mp4">
    <Representation bandwidth="128000"><BaseURL>DASH_audio.mp4</BaseURL></Representation>
  </AdaptationSet>
  <AdaptationSet mimeType="video/mp4">
    <Representation bandwidth="900000"><BaseURL>DASH_480.mp4</BaseURL></Representation>
  </AdaptationSet>
</Period></MPD>"#;
        let reps = audio_representations(doc).unwrap();
        assert_eq!(reps.len(), 1);
        assert_eq!(reps[0].base_url, "DASH_audio.mp4");
    }

    #[test]
    fn representation_without_base_url_skipped() {
        let doc = br#"<MPD xmlns="urn:mpeg:dash:schema:mpd:2011"><Period>
  <AdaptationSet contentType="audio">
    <Representation bandwidth="500000"/>
    <Representation bandwidth="64000"><BaseURL>a&amp;b.mp4</BaseURL></Representation>
  </AdaptationSet>
</Period></MPD>"#;
        let reps = audio_representations(doc).unwrap();
        assert_eq!(reps.len(), 1);
        assert_eq!(reps[0].base_url, "a&b.mp4");
    }

    #[test]
    fn malformed_documents_error() {
        assert!(audio_representations(b"").is_err());
        assert!(audio_representations(b"<MPD><Period></MPD>").is_err());
    }
}
