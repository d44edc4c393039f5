//! Walk through a point drag on a clip: create, cross, backtrack, release

use clip_envelope::prelude::*;

fn print_points(label: &str, points: &[EnvelopePoint]) {
    let formatted: Vec<String> = points
        .iter()
        .map(|p| format!("({:.2}s, {:+.1}dB)", p.time, p.db))
        .collect();
    println!("   {label:<10} {}", formatted.join(" "));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    println!("Clip envelope drag\n");

    let clip = Clip::new(ClipId(1), 0.0, 4.0)?.with_envelope(&[
        EnvelopePoint::new(0.0, 0.0),
        EnvelopePoint::new(1.0, 6.0),
        EnvelopePoint::new(2.0, -6.0),
        EnvelopePoint::new(3.0, 3.0),
        EnvelopePoint::new(4.0, 0.0),
    ]);
    let mut track = Track::new("Vocals").with_clip(clip);

    // 100 px per second, 144 px lane: 2 px per dB, 0 dB at y = 24
    let layout = TrackLayout::new(0.0, 0.0, 144.0, 100.0)?;
    let mut editor = EnvelopeEditor::new(layout);
    let to_px = |time: f64, db: f32| Point::new((time * 100.0) as f32, 24.0 - 2.0 * db);

    print_points("start", &track.clips[0].envelope_points);

    if let PointerDown::Envelope { selection, .. } = editor.pointer_down(&track, to_px(1.0, 6.0)) {
        println!("   selected  {:.2}s..{:.2}s", selection.start, selection.end);
    }

    if let Some(working) = editor.pointer_move(to_px(2.5, 6.0)) {
        print_points("crossed", &working);
    }
    if let Some(working) = editor.pointer_move(to_px(0.5, 6.0)) {
        print_points("backtrack", &working);
    }

    let outcome = editor.pointer_up(&mut track, to_px(0.5, 6.0))?;
    if let Some(outcome) = outcome {
        print_points("committed", outcome.points());
    }

    println!("\n   gain at 1.25s: {:+.2} dB", track.clips[0].db_at(1.25));
    Ok(())
}
