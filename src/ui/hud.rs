//! In-game HUD - hp bar and run statistics.

use bevy::prelude::*;

use crate::core::GameState;
use crate::session::ActiveSession;

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for health bar fill.
#[derive(Component)]
pub struct HealthBar;

/// Marker for the statistics text.
#[derive(Component)]
pub struct StatsText;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnEnter(GameState::GameOver), cleanup_hud)
        .add_systems(OnEnter(GameState::HeroSelect), cleanup_hud)
        .add_systems(
            Update,
            (update_health_bar, update_stats_text)
                .run_if(in_state(GameState::InGame).and(resource_exists::<ActiveSession>)),
        );
}

/// Spawn the HUD UI. Coming back from pause finds it still in place.
fn spawn_hud(mut commands: Commands, existing: Query<(), With<HudRoot>>) {
    if !existing.is_empty() {
        return;
    }

    // HUD root container (top-left corner)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Start,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            // Health bar
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    margin: UiRect::bottom(Val::Px(5.0)),
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((
                        Text::new("HP"),
                        TextFont {
                            font_size: 14.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.8, 0.8, 0.8)),
                        Node {
                            width: Val::Px(40.0),
                            ..default()
                        },
                    ));

                    row.spawn((
                        Node {
                            width: Val::Px(150.0),
                            height: Val::Px(12.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
                    ))
                    .with_children(|bg| {
                        bg.spawn((
                            Node {
                                width: Val::Percent(100.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                            BackgroundColor(Color::srgb(0.8, 0.2, 0.2)),
                            HealthBar,
                        ));
                    });
                });

            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.9)),
                StatsText,
            ));
        });
}

/// Update health bar based on hero hp.
fn update_health_bar(
    session: Res<ActiveSession>,
    mut bar_query: Query<&mut Node, With<HealthBar>>,
) {
    let Ok(mut bar) = bar_query.get_single_mut() else {
        return;
    };

    let hero = session.0.hero();
    let percentage = hero.hp() as f32 / hero.max_hp().max(1) as f32;
    bar.width = Val::Percent(percentage.clamp(0.0, 1.0) * 100.0);
}

fn update_stats_text(
    session: Res<ActiveSession>,
    mut text_query: Query<&mut Text, With<StatsText>>,
) {
    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };

    let session = &session.0;
    let hero = session.hero();
    **text = format!(
        "{}  Lv {}  HP {}/{}  EXP {}/{}\nScore {}  Kills {}  Time {:.1}s",
        hero.class(),
        hero.level(),
        hero.hp(),
        hero.max_hp(),
        hero.exp(),
        hero.exp_to_next_level(),
        session.score(),
        session.enemies_killed(),
        session.elapsed_secs(),
    );
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
