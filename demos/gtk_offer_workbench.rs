#[cfg(feature = "desktop")]
fn main() {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use gtk4 as gtk;
    use gtk4::prelude::*;

    use offerchart_rs::api::OfferChartConfig;
    use offerchart_rs::core::{Offer, OfferTerms, Viewport};
    use offerchart_rs::platform_gtk::GtkChartAdapter;
    use offerchart_rs::render::CairoRenderer;
    use offerchart_rs::OfferChartEngine;

    const WIDTH: i32 = 1280;
    const HEIGHT: i32 = 760;

    let app = gtk::Application::builder()
        .application_id("rs.offerchart.examples.workbench")
        .build();

    app.connect_activate(|app| {
        let renderer = match CairoRenderer::new(WIDTH, HEIGHT) {
            Ok(renderer) => renderer,
            Err(err) => {
                eprintln!("failed to create cairo renderer: {err}");
                return;
            }
        };

        let config = OfferChartConfig::new(Viewport::new(WIDTH as u32, HEIGHT as u32))
            .with_unit_label("USDC");
        let mut engine = match OfferChartEngine::new(renderer, config) {
            Ok(engine) => engine,
            Err(err) => {
                eprintln!("failed to create engine: {err}");
                return;
            }
        };

        let offers: Vec<Offer> = (0..60)
            .filter_map(|i| {
                let t = i as f64;
                let principal = 1_000.0 + (t * 2.3).sin().abs() * 8_000.0;
                let rate = 3.0 + (t * 1.7).cos().abs() * 12.0;
                Offer::new(principal, rate, 1_700_000_000.0 - t * 7_200.0)
                    .ok()
                    .map(|offer| offer.with_id(format!("market-{i}")).with_duration_days(90))
            })
            .collect();
        if let Err(err) = engine.set_offers(offers) {
            eprintln!("failed to load offers: {err}");
            return;
        }
        if let Err(err) = engine.set_user_offer(OfferTerms {
            principal: 5_000.0,
            rate: 8.0,
        }) {
            eprintln!("failed to place user offer: {err}");
            return;
        }

        let adapter = Rc::new(RefCell::new(GtkChartAdapter::new(engine)));
        let area = gtk::DrawingArea::builder()
            .content_width(WIDTH)
            .content_height(HEIGHT)
            .build();

        {
            let adapter = Rc::clone(&adapter);
            area.set_draw_func(move |_, cr, _, _| {
                let mut adapter = adapter.borrow_mut();
                if let Err(err) = adapter.engine_mut().render() {
                    eprintln!("render failed: {err}");
                    return;
                }
                let surface = adapter.engine().renderer().surface().clone();
                if cr.set_source_surface(&surface, 0.0, 0.0).is_ok() {
                    let _ = cr.paint();
                }
            });
        }

        let motion = gtk::EventControllerMotion::new();
        {
            let adapter = Rc::clone(&adapter);
            let area = area.clone();
            motion.connect_motion(move |_, x, y| {
                if let Err(err) = adapter.borrow_mut().on_pointer_motion(x, y) {
                    eprintln!("pointer move failed: {err}");
                }
                area.queue_draw();
            });
        }
        {
            let adapter = Rc::clone(&adapter);
            motion.connect_leave(move |_| adapter.borrow_mut().on_pointer_leave());
        }
        area.add_controller(motion);

        let click = gtk::GestureClick::new();
        {
            let adapter = Rc::clone(&adapter);
            click.connect_pressed(move |_, _, x, y| {
                if let Err(err) = adapter.borrow_mut().on_pointer_pressed(x, y) {
                    eprintln!("pointer down failed: {err}");
                }
            });
        }
        {
            let adapter = Rc::clone(&adapter);
            let area = area.clone();
            click.connect_released(move |_, _, _, _| {
                adapter.borrow_mut().on_pointer_released();
                area.queue_draw();
            });
        }
        area.add_controller(click);

        {
            let adapter = Rc::clone(&adapter);
            let last_frame_us: Rc<Cell<i64>> = Rc::new(Cell::new(0));
            area.add_tick_callback(move |area, frame_clock| {
                let now_us = frame_clock.frame_time();
                let last_us = last_frame_us.replace(now_us);
                if last_us > 0 {
                    let delta_ms = (now_us - last_us) as f64 / 1_000.0;
                    if let Err(err) = adapter.borrow_mut().on_tick(delta_ms) {
                        eprintln!("frame tick failed: {err}");
                    }
                    if adapter.borrow().engine().is_animating()
                        || !adapter.borrow().engine().pending_invalidation().is_none()
                    {
                        area.queue_draw();
                    }
                }
                gtk::glib::ControlFlow::Continue
            });
        }

        let window = gtk::ApplicationWindow::builder()
            .application(app)
            .title("offerchart-rs | offer workbench")
            .default_width(WIDTH)
            .default_height(HEIGHT)
            .build();
        window.set_child(Some(&area));
        window.present();
    });

    let _ = app.run();
}

#[cfg(not(feature = "desktop"))]
fn main() {
    println!("run with: cargo run --features desktop --example gtk_offer_workbench");
}
