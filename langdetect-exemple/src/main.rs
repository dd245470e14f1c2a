use langdetect_core::{Detector, DetectorSettings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Languages given on the command line replace the default list,
    // e.g. `langdetect-exemple en de fr`
    let languages: Vec<String> = std::env::args().skip(1).collect();
    let mut settings = if languages.is_empty() {
        DetectorSettings::default()
    } else {
        DetectorSettings::with_languages(languages.as_slice())
    };

    // Only keep languages above 10%, at most three of them
    settings.prob_threshold = 0.1;
    settings.max = Some(3);

    // Profiles are read once from "./profiles"; the detector never reloads
    let detector = Detector::from_settings(&settings, "./profiles")?;
    println!("Loaded languages: {}", detector.languages().join(", "));

    // A filter pattern is compiled up front, an invalid one fails here
    let invalid = DetectorSettings {
        pattern: Some("(".to_owned()),
        ..settings.clone()
    };
    match Detector::from_settings(&invalid, "./profiles") {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Invalid pattern rejected: {}", e),
    }

    let samples = [
        "The quick brown fox jumps over the lazy dog",
        "Der schnelle braune Fuchs springt über den faulen Hund",
        "Le renard brun rapide saute par-dessus le chien paresseux",
        "12345 !!! ###",
    ];

    for text in samples {
        let result = detector.detect_all(text);
        if result.is_empty() {
            println!("{:?} -> no language", text);
            continue;
        }
        let ranked: Vec<String> = result
            .iter()
            .map(|l| format!("{} ({:.5})", l.code, l.probability))
            .collect();
        println!("{:?} -> {}", text, ranked.join(", "));
    }

    // Repeated calls give the same answer
    let first = detector.detect_all(samples[0]);
    let second = detector.detect_all(samples[0]);
    println!("Deterministic: {}", first == second);

    Ok(())
}
