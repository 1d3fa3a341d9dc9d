use std::cell::Cell;

use eframe::egui;

use crate::models::TableData;

#[derive(Debug)]
pub enum ResultsGridEvent {
    ColumnSorted(usize),
}

pub struct ResultsGrid;

impl ResultsGrid {
    pub fn new() -> Self {
        Self
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        data: &TableData,
        sort_column: Option<usize>,
        sort_ascending: bool,
    ) -> Option<ResultsGridEvent> {
        let column_to_sort = Cell::new(None);

        let available_height = ui.available_height();
        egui::ScrollArea::both()
            .id_source("results_grid")
            .max_height(available_height)
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                use egui_extras::{Column, TableBuilder};

                let table = TableBuilder::new(ui)
                    .striped(true)
                    .resizable(true)
                    .vscroll(true)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .column(Column::initial(50.0).at_least(40.0).resizable(false)) // line numbers
                    .columns(
                        Column::initial(120.0).at_least(80.0).resizable(true).clip(true),
                        data.columns.len(),
                    )
                    .min_scrolled_height(available_height);

                table
                    .header(22.0, |mut header| {
                        header.col(|ui| {
                            ui.strong("#");
                        });

                        for (col_index, column) in data.columns.iter().enumerate() {
                            header.col(|ui| {
                                ui.vertical(|ui| {
                                    let sort_indicator = if sort_column == Some(col_index) {
                                        if sort_ascending { " ▲" } else { " ▼" }
                                    } else {
                                        ""
                                    };

                                    let header_text = format!("{}{}", column.name, sort_indicator);
                                    if ui
                                        .button(egui::RichText::new(header_text).strong())
                                        .clicked()
                                    {
                                        column_to_sort.set(Some(col_index));
                                    }

                                    if !column.data_type.is_empty() {
                                        ui.label(
                                            egui::RichText::new(&column.data_type)
                                                .size(9.0)
                                                .color(egui::Color32::from_rgb(150, 150, 150)),
                                        );
                                    }
                                });
                            });
                        }
                    })
                    .body(|mut body| {
                        for (row_index, row) in data.rows.iter().enumerate() {
                            body.row(18.0, |mut row_ui| {
                                row_ui.col(|ui| {
                                    ui.label(
                                        egui::RichText::new(format!("{}", row_index + 1))
                                            .color(egui::Color32::from_rgb(150, 150, 150)),
                                    );
                                });

                                for cell in row {
                                    row_ui.col(|ui| {
                                        ui.style_mut().wrap = Some(false);
                                        let response = ui.add(
                                            egui::Label::new(cell).truncate(true).selectable(true),
                                        );
                                        response.context_menu(|ui| {
                                            if ui.button("Copy Cell Value").clicked() {
                                                ui.output_mut(|o| o.copied_text = cell.clone());
                                                ui.close_menu();
                                            }
                                        });
                                    });
                                }
                            });
                        }
                    });
            });

        column_to_sort.get().map(ResultsGridEvent::ColumnSorted)
    }
}
