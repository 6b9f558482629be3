use bevy::{
    diagnostic::{DiagnosticPath, DiagnosticsStore, FrameTimeDiagnosticsPlugin},
    prelude::*,
};
use jets_core::{sets::SceneUpdateSet, SceneConfig};

const STATS_FONT_SIZE: f32 = 16.0;
const TOGGLE_STATS_KEY: KeyCode = KeyCode::F3;

/// Frame-rate overlay in the top-left corner, toggled with F3.
pub struct StatsPlugin;

impl Plugin for StatsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_stats_overlay).add_systems(
            Update,
            (toggle_stats_system, stats_text_update_system).in_set(SceneUpdateSet::Overlay),
        );
    }
}

/// Marker to find the container entity so we can show/hide the counters
#[derive(Component)]
pub struct StatsRoot;

#[derive(Component)]
pub struct FpsText;

#[derive(Component)]
pub struct FrameTimeText;

fn stats_line<T: Component>(commands: &mut Commands, label: &str, marker: T) -> Entity {
    commands
        .spawn((
            Text::new(label),
            TextFont::from_font_size(STATS_FONT_SIZE),
            TextColor(Color::WHITE),
        ))
        .with_child((
            marker,
            TextSpan::new("N/A"),
            TextFont::from_font_size(STATS_FONT_SIZE),
            TextColor(Color::WHITE),
        ))
        .id()
}

fn setup_stats_overlay(mut commands: Commands, config: Res<SceneConfig>) {
    let visibility = if config.show_stats {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };

    let root = commands
        .spawn((
            StatsRoot,
            visibility,
            BackgroundColor(Color::BLACK.with_alpha(0.5)),
            // drawn over everything else
            GlobalZIndex(i32::MAX),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(1.),
                top: Val::Percent(1.),
                bottom: Val::Auto,
                right: Val::Auto,
                padding: UiRect::all(Val::Px(4.0)),
                flex_direction: FlexDirection::Column,
                ..default()
            },
        ))
        .id();

    let fps = stats_line(&mut commands, "FPS: ", FpsText);
    let frame_time = stats_line(&mut commands, "Frame: ", FrameTimeText);
    commands.entity(root).add_children(&[fps, frame_time]);
}

fn format_fps(fps: Option<f64>) -> String {
    match fps {
        Some(value) => format!("{value:.0}"),
        None => "N/A".to_string(),
    }
}

fn format_frame_time(millis: Option<f64>) -> String {
    match millis {
        Some(value) => format!("{value:.2} ms"),
        None => "N/A".to_string(),
    }
}

fn stats_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut fps_spans: Query<&mut TextSpan, (With<FpsText>, Without<FrameTimeText>)>,
    mut frame_time_spans: Query<&mut TextSpan, (With<FrameTimeText>, Without<FpsText>)>,
) {
    let smoothed = |path: &DiagnosticPath| diagnostics.get(path).and_then(|diagnostic| diagnostic.smoothed());

    let fps = format_fps(smoothed(&FrameTimeDiagnosticsPlugin::FPS));
    for mut span in &mut fps_spans {
        **span = fps.clone();
    }

    let frame_time = format_frame_time(smoothed(&FrameTimeDiagnosticsPlugin::FRAME_TIME));
    for mut span in &mut frame_time_spans {
        **span = frame_time.clone();
    }
}

/// Toggle the counters when pressing F3
fn toggle_stats_system(
    mut roots: Query<&mut Visibility, With<StatsRoot>>,
    kbd: Res<ButtonInput<KeyCode>>,
) {
    if !kbd.just_pressed(TOGGLE_STATS_KEY) {
        return;
    }
    for mut visibility in &mut roots {
        *visibility = match *visibility {
            Visibility::Hidden => Visibility::Inherited,
            _ => Visibility::Hidden,
        };
    }
}
