use crate::flip::use_flip;
use crate::layout::{self, TileKind};
use echotango_core::{CellIndex, Face};
use yew::prelude::*;

/// Cosmetic per-cell transition length so neighbours don't turn in lockstep.
fn transition_ms(cell: CellIndex) -> u32 {
    let step = (u32::from(cell.get()) * 5) % 7;
    600 + 40 * step
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GridCellProps {
    pub index: CellIndex,
    #[prop_or_default]
    pub children: Html,
}

/// One flippable cell. Shows `children` on the front and the tile for its index on the back.
#[function_component]
pub(crate) fn GridCell(props: &GridCellProps) -> Html {
    let flip = use_flip();
    let GridCellProps { index, children } = props.clone();

    let face = flip.face(index);
    let slot = layout::slot_for(index);
    let style = format!("transition-duration: {}ms", transition_ms(index));

    let (front_class, back_class) = match face {
        Face::Front => ("shown", "hidden"),
        Face::Back => ("hidden", "shown"),
    };

    let back = if index.get() == layout::WORK_CELL {
        html! { <HomeTile/> }
    } else {
        html! { <VideoTile {index}/> }
    };

    html! {
        <div
            class={classes!("grid-cell", slot.kind.class(), slot.borders.classes(), face.name())}
            data-cell={index.to_string()}
        >
            <div class={classes!("face", "front", front_class)} style={style.clone()} aria-hidden={face.is_back().to_string()}>
                { children }
            </div>
            <div class={classes!("face", "back", back_class)} {style} aria-hidden={(!face.is_back()).to_string()}>
                { back }
            </div>
        </div>
    }
}

/// Back of the work cell: returns the whole grid to its front.
#[function_component]
pub(crate) fn HomeTile() -> Html {
    let flip = use_flip();
    let onclick = Callback::from(move |e: MouseEvent| {
        e.stop_propagation();
        log::debug!("home clicked");
        flip.set_flipped(false);
    });

    html! {
        <div class="home-tile">
            <button {onclick} aria-label="Flip grid to show main content">{"HOME"}</button>
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct VideoTileProps {
    pub index: CellIndex,
}

#[function_component]
pub(crate) fn VideoTile(props: &VideoTileProps) -> Html {
    html! {
        <div class="video-tile">
            <span>{format!("Video {}", props.index)}</span>
            <i class="play"/>
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct FrontTileProps {
    kind: TileKind,
}

#[function_component]
fn FrontTile(props: &FrontTileProps) -> Html {
    let flip = use_flip();
    let kind = props.kind;

    if kind == TileKind::Work {
        let onclick = Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            log::debug!("work clicked");
            flip.toggle_flip();
        });
        return html! {
            <button class="work-tile" {onclick} aria-label="Flip grid to show work">{kind.label()}</button>
        };
    }

    html! { <div class={classes!("tile", kind.class())}>{kind.label()}</div> }
}

/// The 3×3 grid of flippable cells.
#[function_component]
pub(crate) fn GridView() -> Html {
    let flip = use_flip();

    html! {
        <section
            class="grid"
            data-flipped={flip.is_flipped().to_string()}
            data-borders-visible={flip.borders_visible().to_string()}
        >
            {
                for CellIndex::all().map(|index| {
                    let kind = layout::slot_for(index).kind;
                    html! {
                        <GridCell key={index.get()} {index}>
                            <FrontTile {kind}/>
                        </GridCell>
                    }
                })
            }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_lengths_stay_in_cosmetic_range() {
        for cell in CellIndex::all() {
            let ms = transition_ms(cell);
            assert!((600..=840).contains(&ms), "cell {} got {}", cell, ms);
        }
    }

    #[test]
    fn neighbouring_cells_turn_at_different_speeds() {
        let lengths: Vec<u32> = CellIndex::all().map(transition_ms).collect();
        assert!(lengths.windows(2).all(|pair| pair[0] != pair[1]));
    }
}
