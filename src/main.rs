use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};

use physio_coach::coach::CoachMode;
use physio_coach::config::Config;
use physio_coach::exercise::ExerciseType;
use physio_coach::pose::{Keypoint, LandmarkIndex, Pose};
use physio_coach::session::CoachSession;

const CONFIG_PATH: &str = "config.toml";

/// JSONLの1行: null（検出なし）または33要素の [x, y, z, visibility] 配列
type FrameRecord = Option<Vec<[f32; 4]>>;

fn parse_frame(line: &str) -> Result<Option<Pose>> {
    let record: FrameRecord = serde_json::from_str(line)?;
    let Some(points) = record else {
        return Ok(None);
    };
    if points.len() != LandmarkIndex::COUNT {
        bail!("expected {} keypoints, got {}", LandmarkIndex::COUNT, points.len());
    }
    let mut pose = Pose::default();
    for (kp, &[x, y, z, visibility]) in pose.keypoints.iter_mut().zip(points.iter()) {
        *kp = Keypoint::new(x, y, z, visibility);
    }
    Ok(Some(pose))
}

fn exercise_by_name(name: &str) -> Option<ExerciseType> {
    ExerciseType::ALL.iter().copied().find(|ex| ex.name() == name)
}

/// フレーム周期（ミリ秒）。fps=0 の設定値はゼロ除算になるので1に切り上げる
fn frame_step_ms(target_fps: u32) -> u64 {
    1000 / u64::from(target_fps.max(1))
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: physio-coach <frames.jsonl> [exercise]");
        eprintln!("exercises:");
        for (i, ex) in ExerciseType::ALL.iter().enumerate() {
            eprintln!("  {}: {}", i + 1, ex.name());
        }
        bail!("missing frames file");
    }

    let config = Config::load_or_default(CONFIG_PATH);
    let mut session = CoachSession::new(&config);

    if let Some(name) = args.get(2) {
        let exercise = exercise_by_name(name)
            .with_context(|| format!("unknown exercise: {}", name))?;
        let _ = session.select_exercise(exercise as usize);
    }

    println!("=== Physio Coach - Frame Replay ===");
    println!("frames: {}", args[1]);
    println!("exercise: {}", session.active_exercise().name());
    println!();

    let file = File::open(&args[1]).with_context(|| format!("cannot open {}", args[1]))?;
    let reader = BufReader::new(file);

    let frame_step_ms = frame_step_ms(config.app.target_fps);
    let mut now_ms = 0u64;
    let mut frames = 0u32;
    let mut total_reps = 0u32;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let pose = parse_frame(&line).with_context(|| format!("line {}", line_no + 1))?;

        now_ms += frame_step_ms;
        let out = session.process_frame(pose.as_ref(), now_ms);
        frames += 1;
        total_reps = out.reps;

        let mode = match out.mode {
            CoachMode::Sync => "SYNC",
            CoachMode::Demo => "DEMO",
        };
        println!(
            "[{:5}] reps={:3} depth={:.2} {} {} {}",
            frames,
            out.reps,
            out.depth,
            mode,
            if out.correct { "OK " } else { "NG " },
            out.feedback,
        );
    }

    println!();
    println!("frames: {} ({:.1}s)", frames, now_ms as f64 / 1000.0);
    println!("total reps: {}", total_reps);

    Ok(())
}
