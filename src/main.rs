mod config;
mod constants;
mod game;
mod layout;

use config::AppConfig;
use constants::*;
use game::{Minesweeper, Square};
use layout::Layout;
use nannou::prelude::*;

fn main() {
    env_logger::init();
    log::info!("Starting bombsearcher");
    nannou::app(model).run();
}

#[derive(Clone, Copy, Debug)]
enum GameState {
    Playing,
    Lost,
    Won,
}

struct Model {
    config: AppConfig,
    layout: Layout,
    game_state: GameState,
    minesweeper: Minesweeper,
    first_click: bool,
}

fn model(app: &App) -> Model {
    let config = AppConfig::load()
        .unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        })
        .validated();

    let _window = app
        .new_window()
        .size(config.window.width, config.window.height)
        .resizable(false)
        .title(config.window.title.clone())
        .view(view)
        .event(event)
        .build()
        .unwrap();

    log::info!(
        "New {}x{} game with {} mines",
        config.board.rows,
        config.board.cols,
        config.board.mines
    );

    Model {
        layout: Layout::new(
            config.board.rows,
            config.board.cols,
            config.window.width,
            config.window.height,
        ),
        game_state: GameState::Playing,
        minesweeper: Minesweeper::new(config.board.rows, config.board.cols, config.board.mines),
        first_click: true,
        config,
    }
}

fn event(app: &App, model: &mut Model, event: WindowEvent) {
    match event {
        WindowEvent::MousePressed(MouseButton::Left) => {
            if let Some((row, col)) = model.layout.xy_to_cell(app.mouse.x, app.mouse.y) {
                reveal_at(model, row, col);
            }
        }
        WindowEvent::MousePressed(MouseButton::Right) => {
            if !matches!(model.game_state, GameState::Playing) {
                return;
            }
            if let Some((row, col)) = model.layout.xy_to_cell(app.mouse.x, app.mouse.y) {
                if model.minesweeper.is_square_open(row, col) {
                    return;
                }

                model.minesweeper.mark(row, col);
            }
        }
        WindowEvent::KeyPressed(Key::R) => {
            log::info!(
                "New {}x{} game with {} mines",
                model.config.board.rows,
                model.config.board.cols,
                model.config.board.mines
            );
            model.minesweeper = Minesweeper::new(
                model.config.board.rows,
                model.config.board.cols,
                model.config.board.mines,
            );
            model.game_state = GameState::Playing;
            model.first_click = true;
        }
        _ => {}
    }
}

fn reveal_at(model: &mut Model, row: usize, col: usize) {
    if !matches!(model.game_state, GameState::Playing) {
        return;
    }

    // A flagged square ignores left clicks. Checked before first-click
    // safety runs, so a flag is never lost to a regenerated board.
    if model.minesweeper.is_square_marked(row, col) || model.minesweeper.is_square_open(row, col) {
        return;
    }

    // The first click should always land on a cascade.
    let mut attempts = 0;
    while model.first_click && !matches!(model.minesweeper.square_state(row, col), Square::Empty) {
        if attempts >= MAX_REGEN_ATTEMPTS {
            log::warn!("No safe first click found after {attempts} boards");
            break;
        }
        model.minesweeper = Minesweeper::new(
            model.config.board.rows,
            model.config.board.cols,
            model.config.board.mines,
        );
        attempts += 1;
    }
    model.first_click = false;

    match model.minesweeper.click(row, col) {
        Square::Mine => {
            model.game_state = GameState::Lost;
            log::info!("Mine hit at ({row}, {col}), game over");
        }
        _ => {
            if model.minesweeper.is_board_completed() {
                model.game_state = GameState::Won;
                log::info!("Board completed");
            }
        }
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(GRAY);

    let game_over = !matches!(model.game_state, GameState::Playing);
    let w = model.layout.square_width();
    let h = model.layout.square_height();

    for row in 0..model.minesweeper.rows() {
        for col in 0..model.minesweeper.cols() {
            let (x, y) = model.layout.cell_to_xy(row, col);
            let square = model.minesweeper.square_state(row, col);

            // Once the game ends every mine is exposed, green on a win and
            // red on a loss.
            if game_over && matches!(square, Square::Mine) {
                let background_color = match model.game_state {
                    GameState::Won => Rgb::new(0.2, 0.7, 0.3),
                    _ => Rgb::new(0.8, 0.3, 0.3),
                };
                draw.rect().w_h(w, h).x_y(x, y).color(background_color);
                draw_mine(&draw, x, y, w, h);
                continue;
            }

            if !model.minesweeper.is_square_open(row, col) {
                draw.rect().w_h(w, h).x_y(x, y).color(WHITE);

                if model.minesweeper.is_square_marked(row, col) {
                    draw_flag(&draw, x, y, w, h);
                }
            } else {
                let background_color = match square {
                    Square::Empty | Square::Nearby(_) => Rgb::new(0.3, 0.3, 0.3),
                    Square::Mine => Rgb::new(0.8, 0.3, 0.3),
                };

                draw.rect().w_h(w, h).x_y(x, y).color(background_color);

                match square {
                    Square::Empty => {}
                    Square::Nearby(v) => {
                        draw.text(&v.to_string())
                            .w_h(w, h)
                            .x_y(x, y)
                            .font_size(24)
                            .color(WHITE);
                    }
                    Square::Mine => {
                        draw_mine(&draw, x, y, w, h);
                    }
                }
            }
        }
    }

    if game_over {
        let banner = match model.game_state {
            GameState::Won => "You won! Press R to play again",
            _ => "Boom! Press R to try again",
        };
        let banner_y = model.config.window.height as f32 / 2. - SCREEN_PADDING / 2.;
        draw.text(banner)
            .w_h(model.config.window.width as f32, SCREEN_PADDING)
            .x_y(0., banner_y)
            .font_size(32)
            .color(BLACK);
    }

    draw.to_frame(app, &frame).unwrap();
}

fn draw_mine(draw: &Draw, x: f32, y: f32, w: f32, h: f32) {
    draw.ellipse()
        .w_h(w * 0.5, h * 0.5)
        .x_y(x, y)
        .color(BLACK);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_model(minesweeper: Minesweeper) -> Model {
        let mut config = AppConfig::default();
        config.board.rows = minesweeper.rows();
        config.board.cols = minesweeper.cols();
        config.board.mines = minesweeper.mine_count();
        let config = config.validated();

        Model {
            layout: Layout::new(
                config.board.rows,
                config.board.cols,
                config.window.width,
                config.window.height,
            ),
            game_state: GameState::Playing,
            minesweeper,
            first_click: true,
            config,
        }
    }

    #[test]
    fn flagged_square_ignores_the_first_click() {
        let mut model = test_model(Minesweeper::with_mines_at(3, 3, &[(1, 1)]));
        model.minesweeper.mark(0, 0);

        // (0, 0) is Nearby(1); without the flag guard this would regenerate
        // the board and then open the square.
        reveal_at(&mut model, 0, 0);

        assert!(model.first_click);
        assert!(!model.minesweeper.is_square_open(0, 0));
        assert!(model.minesweeper.is_square_marked(0, 0));
        assert_eq!(model.minesweeper.square_state(1, 1), Square::Mine);
    }

    #[test]
    fn flagged_empty_square_keeps_first_click_safety() {
        let mut model = test_model(Minesweeper::with_mines_at(4, 4, &[(3, 3)]));
        model.minesweeper.mark(0, 0);

        reveal_at(&mut model, 0, 0);

        assert!(model.first_click);
        assert_eq!(model.minesweeper.open_count(), 0);
    }

    #[test]
    fn first_click_regenerates_until_it_lands_on_a_cascade() {
        // (0, 1) starts as Nearby(1), forcing regeneration. A 3x3 board with
        // one mine has Empty squares, so a safe board turns up well within
        // the attempt cap.
        let mut model = test_model(Minesweeper::with_mines_at(3, 3, &[(0, 0)]));

        reveal_at(&mut model, 0, 1);

        assert!(!model.first_click);
        assert_eq!(model.minesweeper.square_state(0, 1), Square::Empty);
        assert!(model.minesweeper.is_square_open(0, 1));
    }

    #[test]
    fn revealing_a_mine_loses_the_game() {
        let mut model = test_model(Minesweeper::with_mines_at(3, 3, &[(1, 1)]));
        model.first_click = false;

        reveal_at(&mut model, 1, 1);

        assert!(matches!(model.game_state, GameState::Lost));
    }

    #[test]
    fn revealing_the_last_safe_square_wins_the_game() {
        let mut model = test_model(Minesweeper::with_mines_at(2, 2, &[(0, 0)]));
        model.first_click = false;

        reveal_at(&mut model, 0, 1);
        reveal_at(&mut model, 1, 0);
        reveal_at(&mut model, 1, 1);

        assert!(matches!(model.game_state, GameState::Won));
    }

    #[test]
    fn clicks_after_game_over_are_ignored() {
        let mut model = test_model(Minesweeper::with_mines_at(3, 3, &[(1, 1)]));
        model.first_click = false;

        reveal_at(&mut model, 1, 1);
        reveal_at(&mut model, 0, 0);

        assert!(!model.minesweeper.is_square_open(0, 0));
    }
}

fn draw_flag(draw: &Draw, x: f32, y: f32, w: f32, h: f32) {
    draw.line()
        .start(pt2(x - w * 0.1, y - h * 0.3))
        .end(pt2(x - w * 0.1, y + h * 0.3))
        .weight(2.)
        .color(BLACK);
    draw.tri()
        .points(
            pt2(x - w * 0.1, y + h * 0.3),
            pt2(x + w * 0.3, y + h * 0.1),
            pt2(x - w * 0.1, y - h * 0.05),
        )
        .color(RED);
}
