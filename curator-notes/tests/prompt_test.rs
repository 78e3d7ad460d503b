use curator_notes::prompt::build_prompt;
use curator_notes::InterpretationRequest;

fn request() -> InterpretationRequest {
    InterpretationRequest {
        artwork_id: 1,
        title: "Starry Night".to_string(),
        artist_name: "Vincent van Gogh".to_string(),
        image_url: "https://example.com/starry.jpg".to_string(),
    }
}

#[test]
fn test_prompt_enforces_hard_boundaries() {
    let prompt = build_prompt(&request()).to_lowercase();

    assert!(prompt.contains("curator's note for a gallery visitor"));
    assert!(prompt.contains("based on what you see"));
    assert!(prompt.contains("third person"));
    assert!(prompt.contains("do not invent facts"));
    assert!(prompt.contains("dates, materials, provenance, artist intent"));
    assert!(prompt.contains("interpretation only"));
    assert!(prompt.contains("1-2 paragraphs"));
    assert!(prompt.contains("\"the artist\""));
    assert!(prompt.contains("do not mention the title"));
    assert!(prompt.contains("poetic language sparingly"));
    assert!(prompt.contains("jargon"));
}

#[test]
fn test_prompt_covers_visual_focus_areas() {
    let prompt = build_prompt(&request()).to_lowercase();
    for focus in ["colors", "composition", "mood", "texture"] {
        assert!(prompt.contains(focus), "missing focus area {}", focus);
    }
}

#[test]
fn test_prompt_leaks_no_metadata() {
    let prompt = build_prompt(&request());
    assert!(!prompt.contains("Starry Night"));
    assert!(!prompt.contains("Vincent van Gogh"));
    assert!(!prompt.contains("https://example.com/starry.jpg"));
}

#[test]
fn test_request_from_artwork_record() {
    let artwork = curator_notes::ArtworkRecord {
        id: 4,
        title: "Harbour".to_string(),
        image_url: "https://img.example/harbour.jpg".to_string(),
        artist: curator_notes::ArtistRecord {
            id: 1,
            name: "Test Artist".to_string(),
            bio: None,
        },
        collection_id: None,
    };

    let request = InterpretationRequest::from(&artwork);
    assert_eq!(request.artwork_id, 4);
    assert_eq!(request.title, "Harbour");
    assert_eq!(request.artist_name, "Test Artist");
    assert_eq!(request.image_url, "https://img.example/harbour.jpg");
}
